//! Pointer-drag state machine for segment boundaries and the playhead.
//!
//! `Idle -> Dragging -> Idle`. A session captures a snapshot at `start`,
//! turns each pointer move into a new segment list and a provisional
//! playback position, and restores playback on `end`. All boundary math is
//! in seconds; pixels only enter through [`PointerInput::fraction`].

use cliptrim_core::{clamp, snap_threshold, snap_to_reference, Segment, TrimConfig};
use tracing::{debug, warn};

use crate::playback::{PlaybackHandle, PlaybackSync};

/// Semantic role of a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragDirection {
    Seek,
    Move,
    Left,
    Right,
}

/// What a gesture acts on: the playhead or one boundary/body of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Seek,
    Move(usize),
    Left(usize),
    Right(usize),
}

impl DragTarget {
    pub fn direction(self) -> DragDirection {
        match self {
            Self::Seek => DragDirection::Seek,
            Self::Move(_) => DragDirection::Move,
            Self::Left(_) => DragDirection::Left,
            Self::Right(_) => DragDirection::Right,
        }
    }

    pub fn segment_index(self) -> Option<usize> {
        match self {
            Self::Seek => None,
            Self::Move(i) | Self::Left(i) | Self::Right(i) => Some(i),
        }
    }
}

/// Pointer position relative to the track it was pressed on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    /// Absolute horizontal pointer position in points.
    pub x: f32,
    /// Left edge of the track in points.
    pub track_left: f32,
    /// Track width in points.
    pub track_width: f32,
}

impl PointerInput {
    pub fn new(x: f32, track_left: f32, track_width: f32) -> Self {
        Self {
            x,
            track_left,
            track_width,
        }
    }

    /// Position along the track in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        if self.track_width <= 0.0 {
            return 0.0;
        }
        clamp(
            f64::from((self.x - self.track_left) / self.track_width),
            0.0,
            1.0,
        )
    }
}

/// Snapshot taken when a drag starts.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub target: DragTarget,
    /// Pointer x at start, for cumulative displacement.
    pub origin_x: f32,
    /// Targeted segment bounds at start.
    pub original_segment: Option<Segment>,
    /// Playback position to restore on release (resize drags only).
    pub original_current_time: Option<f64>,
    /// Whether playback was running before the drag paused it.
    pub was_playing: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum DragState {
    Idle,
    Dragging(DragSession),
}

/// Interprets start/move/end/click gestures against a segment list.
#[derive(Debug, Clone)]
pub struct DragMachine {
    config: TrimConfig,
    duration: f64,
    state: DragState,
}

impl DragMachine {
    pub fn new(duration: f64, config: TrimConfig) -> Self {
        Self {
            config,
            duration,
            state: DragState::Idle,
        }
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// The active session, if any.
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Idle => None,
            DragState::Dragging(session) => Some(session),
        }
    }

    /// Begin a drag. Pauses playback and takes over the current time.
    ///
    /// Returns `false` and stays idle if a drag is already active or the
    /// target index does not exist.
    pub fn start<P: PlaybackHandle + ?Sized>(
        &mut self,
        target: DragTarget,
        pointer: PointerInput,
        segments: &[Segment],
        playback: &mut P,
        sync: &mut PlaybackSync,
    ) -> bool {
        if self.is_dragging() {
            warn!(?target, "Drag start ignored, a drag is already active");
            return false;
        }

        let original_segment = match target.segment_index() {
            Some(index) => match segments.get(index) {
                Some(segment) => Some(*segment),
                None => {
                    warn!(index, len = segments.len(), "Drag start on missing segment");
                    return false;
                }
            },
            None => None,
        };

        let original_current_time = match target.direction() {
            DragDirection::Left | DragDirection::Right => Some(sync.current_time()),
            DragDirection::Seek | DragDirection::Move => None,
        };

        let was_playing = !playback.is_paused();
        playback.pause();
        sync.begin_drag();

        debug!(?target, was_playing, "Drag started");
        self.state = DragState::Dragging(DragSession {
            target,
            origin_x: pointer.x,
            original_segment,
            original_current_time,
            was_playing,
        });
        true
    }

    /// Apply one pointer move. Returns the full updated list, or `None`
    /// when idle or when the targeted segment no longer exists.
    pub fn drag_to<P: PlaybackHandle + ?Sized>(
        &mut self,
        pointer: PointerInput,
        segments: &[Segment],
        playback: &mut P,
        sync: &mut PlaybackSync,
    ) -> Option<Vec<Segment>> {
        let DragState::Dragging(session) = &self.state else {
            return None;
        };
        let duration = self.duration;
        let candidate = pointer.fraction() * duration;
        let mut next = segments.to_vec();

        match session.target {
            DragTarget::Seek => {
                let time = clamp(candidate, 0.0, duration);
                sync.set_drag_time(time);
                playback.set_current_time(time);
            }
            DragTarget::Move(index) => {
                let original = session.original_segment?;
                let Some(slot) = next.get_mut(index) else {
                    warn!(index, "Move target vanished during drag");
                    return None;
                };
                let dx = f64::from(pointer.x - session.origin_x);
                let width = f64::from(pointer.track_width.max(f32::EPSILON));
                let delta = clamp(
                    dx / width * duration,
                    -original.start,
                    duration - original.end,
                );
                *slot = original.translate(delta);

                let time = clamp(playback.current_time(), 0.0, duration);
                sync.set_drag_time(time);
                playback.set_current_time(time);
            }
            DragTarget::Left(index) => {
                let Some(slot) = next.get_mut(index) else {
                    warn!(index, "Resize target vanished during drag");
                    return None;
                };
                slot.start = self.resize_left(*slot, candidate, sync.current_time());
                playback.set_current_time(slot.start + self.config.seek_epsilon);
            }
            DragTarget::Right(index) => {
                let Some(slot) = next.get_mut(index) else {
                    warn!(index, "Resize target vanished during drag");
                    return None;
                };
                slot.end = self.resize_right(*slot, candidate, sync.current_time());
                playback.set_current_time(slot.end);
            }
        }

        Some(next)
    }

    fn threshold(&self) -> f64 {
        snap_threshold(self.duration, self.config.snap_factor)
    }

    /// New start for a left-handle drag. Never closer than `min_duration`
    /// to `end`; snaps to `reference` only if that bound still holds.
    fn resize_left(&self, segment: Segment, candidate: f64, reference: f64) -> f64 {
        let limit = (segment.end - self.config.min_duration).max(0.0);
        let start = candidate.min(limit);
        let snapped = snap_to_reference(start, reference, self.threshold());
        if snapped <= limit {
            snapped
        } else {
            start
        }
    }

    /// New end for a right-handle drag, mirroring [`Self::resize_left`].
    fn resize_right(&self, segment: Segment, candidate: f64, reference: f64) -> f64 {
        let limit = (segment.start + self.config.min_duration).min(self.duration);
        let end = candidate.max(limit);
        let snapped = snap_to_reference(end, reference, self.threshold());
        if snapped >= limit {
            snapped
        } else {
            end
        }
    }

    /// Instantaneous seek from a click without movement.
    ///
    /// Only `Seek` clicks act; anything else, or a click during a drag,
    /// is ignored.
    pub fn click<P: PlaybackHandle + ?Sized>(
        &mut self,
        target: DragTarget,
        pointer: PointerInput,
        playback: &mut P,
        sync: &mut PlaybackSync,
    ) {
        if self.is_dragging() || target != DragTarget::Seek {
            return;
        }
        let time = clamp(pointer.fraction() * self.duration, 0.0, self.duration);
        debug!(time, "Seek click");
        sync.seek(playback, time);
    }

    /// Finish the drag, committing whatever the last move produced.
    ///
    /// Returns the finished session so the owner can record it.
    pub fn end<P: PlaybackHandle + ?Sized>(
        &mut self,
        playback: &mut P,
        sync: &mut PlaybackSync,
    ) -> Option<DragSession> {
        let DragState::Dragging(session) = std::mem::replace(&mut self.state, DragState::Idle)
        else {
            return None;
        };

        if let Some(time) = session.original_current_time {
            playback.set_current_time(time);
        }
        sync.end_drag(playback);
        if session.was_playing {
            playback.play();
        }
        debug!(target = ?session.target, "Drag ended");
        Some(session)
    }
}
