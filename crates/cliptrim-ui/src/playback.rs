//! Binding between the editor's `(current_time, playing)` pair and a live
//! playback handle.
//!
//! Writer arbitration: while no drag is active the synchronizer is the only
//! writer of the local current time and mirrors the handle on every
//! notification. While a drag is active the drag state machine is the only
//! writer; time-advance notifications then update `playing` but never the
//! local time. The two writers never overlap.

use cliptrim_core::clamp;
use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::debug;

/// Notification emitted by a playback handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    Play,
    Pause,
    Playing,
    TimeAdvanced,
    /// Playback reached the end of the media.
    Ended,
}

/// A live media playback handle.
pub trait PlaybackHandle {
    /// Total media length in seconds.
    fn duration(&self) -> f64;
    /// Current playback position in seconds.
    fn current_time(&self) -> f64;
    /// Move the playback position.
    fn set_current_time(&mut self, time: f64);
    /// Whether playback is paused.
    fn is_paused(&self) -> bool;
    fn play(&mut self);
    fn pause(&mut self);
    /// Register for notifications. Dropping the receiver unsubscribes.
    fn subscribe(&mut self) -> Receiver<PlaybackEvent>;
}

/// Who may write the local current time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimeWriter {
    /// Native notifications drive the time (no drag active).
    Synchronizer,
    /// A drag session drives the time; notifications may not overwrite it.
    Drag,
}

/// Keeps `(current_time, playing)` consistent with a playback handle.
#[derive(Debug)]
pub struct PlaybackSync {
    current_time: f64,
    playing: bool,
    writer: TimeWriter,
    events: Option<Receiver<PlaybackEvent>>,
}

impl PlaybackSync {
    /// Subscribe to `handle` and take its current state.
    pub fn attach<P: PlaybackHandle + ?Sized>(handle: &mut P) -> Self {
        let events = handle.subscribe();
        debug!("Playback synchronizer attached");
        Self {
            current_time: handle.current_time(),
            playing: !handle.is_paused(),
            writer: TimeWriter::Synchronizer,
            events: Some(events),
        }
    }

    /// Drop the subscription. Further `pump` calls are no-ops.
    pub fn detach(&mut self) {
        if self.events.take().is_some() {
            debug!("Playback synchronizer detached");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.events.is_some()
    }

    /// Drain pending notifications, returning them in arrival order.
    pub fn pump<P: PlaybackHandle + ?Sized>(&mut self, handle: &P) -> Vec<PlaybackEvent> {
        let Some(events) = &self.events else {
            return Vec::new();
        };
        let drained: Vec<PlaybackEvent> = events.try_iter().collect();
        for _ in &drained {
            self.update(handle);
        }
        drained
    }

    fn update<P: PlaybackHandle + ?Sized>(&mut self, handle: &P) {
        self.playing = !handle.is_paused();
        if self.writer == TimeWriter::Synchronizer {
            self.current_time = handle.current_time();
        }
    }

    /// Hand time ownership to a drag session.
    pub fn begin_drag(&mut self) {
        self.writer = TimeWriter::Drag;
    }

    /// Take time ownership back and resync from the handle.
    pub fn end_drag<P: PlaybackHandle + ?Sized>(&mut self, handle: &P) {
        self.writer = TimeWriter::Synchronizer;
        self.update(handle);
    }

    /// True while native time updates are suppressed.
    pub fn is_suppressed(&self) -> bool {
        self.writer == TimeWriter::Drag
    }

    /// Set the local time from a drag session. Ignored outside a drag.
    pub fn set_drag_time(&mut self, time: f64) {
        if self.writer == TimeWriter::Drag {
            self.current_time = time;
        }
    }

    /// Instantaneous seek outside a drag: writes the handle and mirrors it.
    pub fn seek<P: PlaybackHandle + ?Sized>(&mut self, handle: &mut P, time: f64) {
        let time = clamp(time, 0.0, handle.duration());
        handle.set_current_time(time);
        if self.writer == TimeWriter::Synchronizer {
            self.current_time = handle.current_time();
        }
    }

    pub fn current_time(&self) -> f64 {
        self.current_time
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

/// Playback handle driven by an external clock.
///
/// Holds only a position and a paused flag; callers advance it with
/// [`ClockPlayback::advance`]. Used for headless sessions and as the
/// preview transport when no decoder is attached.
#[derive(Debug)]
pub struct ClockPlayback {
    duration: f64,
    position: f64,
    paused: bool,
    subscribers: Vec<Sender<PlaybackEvent>>,
}

impl ClockPlayback {
    /// Create a paused handle at position zero.
    pub fn new(duration: f64) -> Self {
        Self {
            duration,
            position: 0.0,
            paused: true,
            subscribers: Vec::new(),
        }
    }

    /// Advance the position by `dt` seconds if playing.
    pub fn advance(&mut self, dt: f64) {
        if self.paused || dt <= 0.0 {
            return;
        }
        self.position += dt;
        if self.position >= self.duration {
            self.position = self.duration;
            self.paused = true;
            self.emit(PlaybackEvent::TimeAdvanced);
            self.emit(PlaybackEvent::Pause);
            self.emit(PlaybackEvent::Ended);
        } else {
            self.emit(PlaybackEvent::TimeAdvanced);
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn emit(&mut self, event: PlaybackEvent) {
        // Closed receivers are pruned here.
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }
}

impl PlaybackHandle for ClockPlayback {
    fn duration(&self) -> f64 {
        self.duration
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn set_current_time(&mut self, time: f64) {
        self.position = clamp(time, 0.0, self.duration);
        self.emit(PlaybackEvent::TimeAdvanced);
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn play(&mut self) {
        if !self.paused {
            return;
        }
        if self.position >= self.duration {
            self.position = 0.0;
        }
        self.paused = false;
        self.emit(PlaybackEvent::Play);
        self.emit(PlaybackEvent::Playing);
    }

    fn pause(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        self.emit(PlaybackEvent::Pause);
    }

    fn subscribe(&mut self) -> Receiver<PlaybackEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }
}
