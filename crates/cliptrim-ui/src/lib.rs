//! ClipTrim UI - interactive segment timeline
//!
//! Provides:
//! - Playback synchronizer and clock-driven playback handle
//! - Drag state machine for seek, move and resize gestures
//! - Trim session that owns the segment list and its history
//! - Timeline surface and transport widgets

pub mod drag;
pub mod playback;
pub mod session;
pub mod theme;
pub mod timeline;

pub use drag::{DragDirection, DragMachine, DragSession, DragTarget, PointerInput};
pub use playback::{ClockPlayback, PlaybackEvent, PlaybackHandle, PlaybackSync};
pub use session::{AddOutcome, ChangeListener, TrimSession};
pub use theme::Theme;
pub use timeline::{show_timeline, Hit, TimelineAction, TimelineState, TimelineView, TrackGeometry};

use cliptrim_core::format_time;
use egui::Ui;

/// Transport controls (play/pause and time readout).
#[derive(Debug, Default)]
pub struct TransportControls;

impl TransportControls {
    pub fn new() -> Self {
        Self
    }

    /// Draw the controls. Returns `TogglePlay` when the button is pressed.
    pub fn show(
        &mut self,
        ui: &mut Ui,
        playing: bool,
        current_time: f64,
        duration: f64,
    ) -> Option<TimelineAction> {
        let mut action = None;
        ui.horizontal(|ui| {
            let play_text = if playing { "⏸" } else { "▶" };
            if ui
                .button(egui::RichText::new(play_text).size(Theme::TEXT_LARGE))
                .clicked()
            {
                action = Some(TimelineAction::TogglePlay);
            }

            ui.label(
                egui::RichText::new(format!(
                    "{} / {}",
                    format_time(current_time),
                    format_time(duration)
                ))
                .size(Theme::TEXT)
                .color(Theme::TEXT_BODY)
                .family(egui::FontFamily::Monospace),
            );
        });
        action
    }
}
