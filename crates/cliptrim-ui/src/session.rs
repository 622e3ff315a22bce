//! One editing session: the authoritative segment list plus the playback
//! binding and drag machine that edit it.
//!
//! Constructed once the media duration is known and dropped when editing
//! ends; dropping it unsubscribes from the playback handle.

use cliptrim_core::{validate_duration, Result, Segment, TrimConfig};
use cliptrim_timeline::{
    default_segments, export_ranges, fill_first_gap, overlapping_pairs, validate, EditCommand,
    UndoStack,
};
use tracing::{debug, info, warn};

use crate::drag::DragMachine;
use crate::playback::{PlaybackEvent, PlaybackHandle, PlaybackSync};
use crate::timeline::{TimelineAction, TimelineView};

/// Callback invoked with the new list after every committed edit.
pub type ChangeListener = Box<dyn FnMut(&[Segment])>;

/// Result of an "add segment" request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// Every instant of the media is already selected.
    FullyCovered,
    /// A drag is in progress.
    Blocked,
}

pub struct TrimSession<P: PlaybackHandle> {
    playback: P,
    sync: PlaybackSync,
    drag: DragMachine,
    segments: Vec<Segment>,
    duration: f64,
    config: TrimConfig,
    undo: UndoStack,
    /// List as it was when the active drag started.
    drag_snapshot: Option<Vec<Segment>>,
    on_change: Option<ChangeListener>,
}

impl<P: PlaybackHandle> TrimSession<P> {
    /// Start a session over `playback`. An absent or empty `segments`
    /// defaults to one segment spanning the media.
    ///
    /// Fails with `InvalidSegment` if any input segment lies outside
    /// `[0, duration]` or is empty.
    pub fn new(mut playback: P, segments: Option<&[Segment]>, config: TrimConfig) -> Result<Self> {
        let duration = validate_duration(playback.duration())?;
        let config = config.validate()?;
        if let Some(list) = segments {
            validate(list, duration)?;
        }
        let sync = PlaybackSync::attach(&mut playback);
        let segments = default_segments(segments, duration);
        info!(duration, segments = segments.len(), "Trim session started");

        Ok(Self {
            playback,
            sync,
            drag: DragMachine::new(duration, config.clone()),
            segments,
            duration,
            undo: UndoStack::new(config.undo_depth),
            config,
            drag_snapshot: None,
            on_change: None,
        })
    }

    /// Register the owner's change callback.
    pub fn on_change(&mut self, listener: impl FnMut(&[Segment]) + 'static) {
        self.on_change = Some(Box::new(listener));
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn config(&self) -> &TrimConfig {
        &self.config
    }

    pub fn current_time(&self) -> f64 {
        self.sync.current_time()
    }

    pub fn is_playing(&self) -> bool {
        self.sync.is_playing()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn playback(&self) -> &P {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut P {
        &mut self.playback
    }

    pub fn can_undo(&self) -> bool {
        self.undo.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.undo.can_redo()
    }

    /// Snapshot for the timeline surface.
    pub fn view(&self) -> TimelineView<'_> {
        TimelineView {
            segments: &self.segments,
            duration: self.duration,
            current_time: self.sync.current_time(),
            playing: self.sync.is_playing(),
            overlaps: overlapping_pairs(&self.segments),
            can_undo: self.undo.can_undo(),
            can_redo: self.undo.can_redo(),
        }
    }

    /// Ordered, merged ranges for downstream processing.
    pub fn export(&self) -> Vec<Segment> {
        export_ranges(&self.segments, self.duration)
    }

    /// Drain playback notifications and react to end of media.
    pub fn pump(&mut self) {
        let events = self.sync.pump(&self.playback);
        if events.contains(&PlaybackEvent::Ended) && self.config.rewind_on_end {
            let target = self.segments.first().map_or(0.0, |s| s.start);
            debug!(target, "Playback ended, rewinding");
            self.sync.seek(&mut self.playback, target);
        }
    }

    /// Route one surface action.
    pub fn handle(&mut self, action: TimelineAction) {
        match action {
            TimelineAction::DragStart { target, pointer } => {
                if self.drag.start(
                    target,
                    pointer,
                    &self.segments,
                    &mut self.playback,
                    &mut self.sync,
                ) {
                    self.drag_snapshot = Some(self.segments.clone());
                }
            }
            TimelineAction::DragMove { pointer } => {
                if let Some(next) =
                    self.drag
                        .drag_to(pointer, &self.segments, &mut self.playback, &mut self.sync)
                {
                    self.segments = next;
                    self.notify();
                }
            }
            TimelineAction::DragEnd => self.end_drag(),
            TimelineAction::Click { target, pointer } => {
                self.drag
                    .click(target, pointer, &mut self.playback, &mut self.sync);
            }
            TimelineAction::Split(index) => self.split(index),
            TimelineAction::Delete(index) => self.delete(index),
            TimelineAction::AddSegment => {
                self.add_segment();
            }
            TimelineAction::Reset => self.reset(),
            TimelineAction::Undo => self.undo(),
            TimelineAction::Redo => self.redo(),
            TimelineAction::TogglePlay => self.toggle_play(),
        }
    }

    fn end_drag(&mut self) {
        let Some(session) = self.drag.end(&mut self.playback, &mut self.sync) else {
            return;
        };
        let Some(before) = self.drag_snapshot.take() else {
            return;
        };
        if let Some(index) = session.target.segment_index() {
            if let (Some(old), Some(new)) = (before.get(index), self.segments.get(index)) {
                if old != new {
                    debug!(index, before = %old, after = %new, "Drag committed");
                    self.undo.push(EditCommand::Replace {
                        index,
                        before: *old,
                        after: *new,
                    });
                }
            }
        }
    }

    /// Split the segment at `index` at its midpoint.
    pub fn split(&mut self, index: usize) {
        self.commit(EditCommand::Split { index });
    }

    /// Remove the segment at `index`.
    pub fn delete(&mut self, index: usize) {
        match EditCommand::delete(&self.segments, index) {
            Ok(cmd) => self.commit(cmd),
            Err(e) => warn!("Delete ignored: {}", e),
        }
    }

    /// Fill the first uncovered interval with a new segment.
    pub fn add_segment(&mut self) -> AddOutcome {
        if self.drag.is_dragging() {
            return AddOutcome::Blocked;
        }
        let after = fill_first_gap(&self.segments, self.duration);
        if after.len() == self.segments.len() {
            info!("Timeline already fully covered");
            return AddOutcome::FullyCovered;
        }
        self.commit(EditCommand::SetAll {
            before: self.segments.clone(),
            after,
        });
        AddOutcome::Added
    }

    /// Replace the list with one segment spanning the media.
    pub fn reset(&mut self) {
        let after = vec![Segment::full(self.duration)];
        if after == self.segments {
            return;
        }
        self.commit(EditCommand::SetAll {
            before: self.segments.clone(),
            after,
        });
    }

    pub fn undo(&mut self) {
        if self.drag.is_dragging() {
            return;
        }
        if let Some(cmd) = self.undo.undo() {
            self.apply(&cmd);
        }
    }

    pub fn redo(&mut self) {
        if self.drag.is_dragging() {
            return;
        }
        if let Some(cmd) = self.undo.redo() {
            self.apply(&cmd);
        }
    }

    pub fn toggle_play(&mut self) {
        if self.playback.is_paused() {
            self.playback.play();
        } else {
            self.playback.pause();
        }
    }

    fn commit(&mut self, cmd: EditCommand) {
        if self.drag.is_dragging() {
            warn!(command = cmd.name(), "Edit ignored during drag");
            return;
        }
        match cmd.apply(&mut self.segments) {
            Ok(()) => {
                debug!(command = cmd.name(), segments = self.segments.len(), "Edit committed");
                self.undo.push(cmd);
                self.notify();
            }
            Err(e) => warn!(command = cmd.name(), "Edit ignored: {}", e),
        }
    }

    fn apply(&mut self, cmd: &EditCommand) {
        match cmd.apply(&mut self.segments) {
            Ok(()) => self.notify(),
            Err(e) => warn!(command = cmd.name(), "History step failed: {}", e),
        }
    }

    fn notify(&mut self) {
        if let Some(listener) = self.on_change.as_mut() {
            listener(&self.segments);
        }
    }
}

impl<P: PlaybackHandle> Drop for TrimSession<P> {
    fn drop(&mut self) {
        self.sync.detach();
        info!("Trim session closed");
    }
}
