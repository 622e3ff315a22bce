//! Segment timeline: toolbar, track, boundary handles, split/delete
//! controls and the current-time marker.
//!
//! The surface is a controlled view. It never edits segments; it reports
//! gestures as [`TimelineAction`]s and draws whatever list it is given.

use crate::drag::{DragTarget, PointerInput};
use crate::theme::Theme;
use cliptrim_core::{format_time, Segment};
use egui::{self, Color32, CursorIcon, Pos2, Rect, Rounding, Stroke, Vec2};
use std::collections::HashSet;

const CONTROLS_HEIGHT: f32 = 22.0;
const TRACK_HEIGHT: f32 = 40.0;
const LABEL_HEIGHT: f32 = 18.0;
const HANDLE_WIDTH: f32 = 8.0;
const BUTTON_SIZE: f32 = 16.0;
const TOOLBAR_HEIGHT: f32 = 28.0;

/// Height of the interactive area below the toolbar.
pub const SURFACE_HEIGHT: f32 = CONTROLS_HEIGHT + TRACK_HEIGHT + LABEL_HEIGHT;

// ── View input ─────────────────────────────────────────────────

/// Everything the surface draws, supplied fresh each frame.
#[derive(Debug, Clone)]
pub struct TimelineView<'a> {
    pub segments: &'a [Segment],
    pub duration: f64,
    pub current_time: f64,
    pub playing: bool,
    /// Index pairs of overlapping segments.
    pub overlaps: Vec<(usize, usize)>,
    pub can_undo: bool,
    pub can_redo: bool,
}

/// Per-widget interaction state kept across frames.
#[derive(Debug, Clone, Default)]
pub struct TimelineState {
    /// Target of the drag in progress.
    pub active: Option<DragTarget>,
    pub hovered_segment: Option<usize>,
}

// ── Actions ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum TimelineAction {
    DragStart {
        target: DragTarget,
        pointer: PointerInput,
    },
    DragMove {
        pointer: PointerInput,
    },
    DragEnd,
    /// Press and release without movement.
    Click {
        target: DragTarget,
        pointer: PointerInput,
    },
    Split(usize),
    Delete(usize),
    AddSegment,
    Reset,
    Undo,
    Redo,
    TogglePlay,
}

// ── Geometry ───────────────────────────────────────────────────

/// What lies under a pointer position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Split(usize),
    Delete(usize),
    Drag(DragTarget),
}

impl Hit {
    pub fn segment_index(self) -> Option<usize> {
        match self {
            Self::Split(i) | Self::Delete(i) => Some(i),
            Self::Drag(target) => target.segment_index(),
        }
    }
}

/// Time/pixel mapping for one frame of the surface.
#[derive(Debug, Clone, Copy)]
pub struct TrackGeometry {
    pub bounds: Rect,
    pub controls: Rect,
    pub track: Rect,
    pub labels: Rect,
    pub duration: f64,
}

impl TrackGeometry {
    pub fn new(bounds: Rect, duration: f64) -> Self {
        let left = bounds.left() + HANDLE_WIDTH;
        let right = (bounds.right() - HANDLE_WIDTH).max(left);
        let track_top = bounds.top() + CONTROLS_HEIGHT;
        let track_bottom = track_top + TRACK_HEIGHT;
        Self {
            bounds,
            controls: Rect::from_min_max(Pos2::new(left, bounds.top()), Pos2::new(right, track_top)),
            track: Rect::from_min_max(Pos2::new(left, track_top), Pos2::new(right, track_bottom)),
            labels: Rect::from_min_max(
                Pos2::new(left, track_bottom),
                Pos2::new(right, track_bottom + LABEL_HEIGHT),
            ),
            duration,
        }
    }

    pub fn x_for(&self, time: f64) -> f32 {
        let frac = if self.duration > 0.0 {
            (time / self.duration) as f32
        } else {
            0.0
        };
        self.track.left() + frac * self.track.width()
    }

    pub fn pointer(&self, x: f32) -> PointerInput {
        PointerInput::new(x, self.track.left(), self.track.width())
    }

    pub fn segment_rect(&self, segment: Segment) -> Rect {
        Rect::from_x_y_ranges(
            self.x_for(segment.start)..=self.x_for(segment.end),
            self.track.y_range(),
        )
    }

    pub fn left_handle(&self, segment: Segment) -> Rect {
        self.handle_at(self.x_for(segment.start))
    }

    pub fn right_handle(&self, segment: Segment) -> Rect {
        self.handle_at(self.x_for(segment.end))
    }

    fn handle_at(&self, x: f32) -> Rect {
        Rect::from_center_size(
            Pos2::new(x, self.track.center().y),
            Vec2::new(HANDLE_WIDTH, self.track.height()),
        )
    }

    pub fn split_button(&self, segment: Segment) -> Rect {
        self.button_at(self.segment_rect(segment).center().x - BUTTON_SIZE * 0.5 - 1.0)
    }

    pub fn delete_button(&self, segment: Segment) -> Rect {
        self.button_at(self.segment_rect(segment).center().x + BUTTON_SIZE * 0.5 + 1.0)
    }

    fn button_at(&self, x: f32) -> Rect {
        Rect::from_center_size(
            Pos2::new(x, self.controls.center().y),
            Vec2::splat(BUTTON_SIZE),
        )
    }

    /// Resolve a pointer position to a control or drag target.
    ///
    /// Later segments sit on top. Handles win over bodies so a boundary
    /// stays grabbable when a neighbour overlaps it.
    pub fn hit_test(&self, segments: &[Segment], pos: Pos2) -> Option<Hit> {
        let controls_band = Rect::from_x_y_ranges(self.bounds.x_range(), self.controls.y_range());
        if controls_band.contains(pos) {
            return segments.iter().enumerate().rev().find_map(|(i, s)| {
                if self.split_button(*s).contains(pos) {
                    Some(Hit::Split(i))
                } else if self.delete_button(*s).contains(pos) {
                    Some(Hit::Delete(i))
                } else {
                    None
                }
            });
        }

        let track_band = Rect::from_x_y_ranges(self.bounds.x_range(), self.track.y_range());
        if !track_band.contains(pos) {
            return None;
        }

        for (i, segment) in segments.iter().enumerate().rev() {
            if self.left_handle(*segment).contains(pos) {
                return Some(Hit::Drag(DragTarget::Left(i)));
            }
            if self.right_handle(*segment).contains(pos) {
                return Some(Hit::Drag(DragTarget::Right(i)));
            }
        }
        for (i, segment) in segments.iter().enumerate().rev() {
            if self.segment_rect(*segment).contains(pos) {
                return Some(Hit::Drag(DragTarget::Move(i)));
            }
        }
        Some(Hit::Drag(DragTarget::Seek))
    }
}

fn cursor_for(target: DragTarget, dragging: bool) -> CursorIcon {
    match target {
        DragTarget::Left(_) | DragTarget::Right(_) => CursorIcon::ResizeHorizontal,
        DragTarget::Move(_) if dragging => CursorIcon::Grabbing,
        DragTarget::Move(_) => CursorIcon::Grab,
        DragTarget::Seek => CursorIcon::Default,
    }
}

// ── Rendering ──────────────────────────────────────────────────

pub fn show_timeline(
    ui: &mut egui::Ui,
    view: &TimelineView<'_>,
    state: &mut TimelineState,
) -> Vec<TimelineAction> {
    let mut actions = Vec::new();

    ui.vertical(|ui| {
        draw_toolbar(ui, view, &mut actions);
        ui.add_space(Theme::GAP);

        let width = ui.available_width();
        let (response, painter) =
            ui.allocate_painter(Vec2::new(width, SURFACE_HEIGHT), egui::Sense::click_and_drag());
        let geo = TrackGeometry::new(response.rect, view.duration);

        let hover = response
            .hover_pos()
            .and_then(|p| geo.hit_test(view.segments, p));
        state.hovered_segment = hover.and_then(Hit::segment_index);

        // Background track
        painter.rect_filled(geo.track, Theme::rounding(), Theme::TRACK);
        painter.rect_stroke(
            geo.track,
            Theme::rounding(),
            Theme::hairline(),
        );

        let overlapping: HashSet<usize> = view
            .overlaps
            .iter()
            .flat_map(|&(a, b)| [a, b])
            .collect();
        let active_index = state.active.and_then(DragTarget::segment_index);

        for (i, segment) in view.segments.iter().enumerate() {
            let color = if overlapping.contains(&i) {
                Theme::OVERLAP
            } else {
                Theme::SEGMENT
            };
            let emphasized = active_index == Some(i) || state.hovered_segment == Some(i);
            draw_segment(&painter, &geo, *segment, color, emphasized);
        }

        draw_current_time(&painter, &geo, view.current_time);

        // Handle labels for the segment under the pointer or being dragged
        if let Some(segment) = active_index
            .or(state.hovered_segment)
            .and_then(|i| view.segments.get(i))
        {
            draw_handle_labels(&painter, &geo, *segment);
        }

        // Cursor
        if let Some(target) = state.active {
            ui.ctx().set_cursor_icon(cursor_for(target, true));
        } else {
            match hover {
                Some(Hit::Drag(target)) => ui.ctx().set_cursor_icon(cursor_for(target, false)),
                Some(Hit::Split(_) | Hit::Delete(_)) => {
                    ui.ctx().set_cursor_icon(CursorIcon::PointingHand)
                }
                None => {}
            }
        }

        // --- Drag gestures ---
        if response.drag_started() {
            let origin = ui
                .input(|i| i.pointer.press_origin())
                .or(response.interact_pointer_pos());
            if let Some(pos) = origin {
                if let Some(Hit::Drag(target)) = geo.hit_test(view.segments, pos) {
                    state.active = Some(target);
                    actions.push(TimelineAction::DragStart {
                        target,
                        pointer: geo.pointer(pos.x),
                    });
                }
            }
        }

        if response.dragged() && state.active.is_some() {
            if let Some(pos) = response.interact_pointer_pos() {
                actions.push(TimelineAction::DragMove {
                    pointer: geo.pointer(pos.x),
                });
            }
        }

        if response.drag_stopped() && state.active.take().is_some() {
            actions.push(TimelineAction::DragEnd);
        }

        // --- Clicks ---
        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                match geo.hit_test(view.segments, pos) {
                    Some(Hit::Split(i)) => actions.push(TimelineAction::Split(i)),
                    Some(Hit::Delete(i)) => actions.push(TimelineAction::Delete(i)),
                    // A click on a body is a seek, not a move
                    Some(Hit::Drag(DragTarget::Seek | DragTarget::Move(_))) => {
                        actions.push(TimelineAction::Click {
                            target: DragTarget::Seek,
                            pointer: geo.pointer(pos.x),
                        });
                    }
                    Some(Hit::Drag(_)) | None => {}
                }
            }
        }
    });

    actions
}

// ── Sub-components ─────────────────────────────────────────────

fn draw_segment(
    painter: &egui::Painter,
    geo: &TrackGeometry,
    segment: Segment,
    color: Color32,
    emphasized: bool,
) {
    let rect = geo.segment_rect(segment);
    let (bg_alpha, border_alpha) = if emphasized { (60, 160) } else { (36, 96) };

    painter.rect_filled(rect, Theme::rounding(), Theme::tint(color, bg_alpha));
    painter.rect_stroke(
        rect,
        Theme::rounding(),
        Stroke::new(Theme::OUTLINE, Theme::tint(color, border_alpha)),
    );

    // Boundary handles
    for handle in [geo.left_handle(segment), geo.right_handle(segment)] {
        painter.rect_filled(handle, Rounding::same(2.0), color);
        let grip = Rect::from_center_size(handle.center(), Vec2::new(1.5, handle.height() * 0.4));
        painter.rect_filled(grip, 0.0, Theme::GRIP);
    }

    // Split and delete controls
    draw_button(painter, geo.split_button(segment), "\u{2702}", Theme::TEXT_BODY);
    draw_button(painter, geo.delete_button(segment), "\u{2715}", Theme::DANGER);
}

fn draw_button(painter: &egui::Painter, rect: Rect, glyph: &str, color: Color32) {
    painter.rect_filled(rect, Rounding::same(Theme::CORNER * 0.5), Theme::CONTROL);
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        glyph,
        egui::FontId::proportional(Theme::TEXT_SMALL),
        color,
    );
}

fn draw_current_time(painter: &egui::Painter, geo: &TrackGeometry, time: f64) {
    let x = geo.x_for(time);

    // Indicator triangle above the track
    let tri_w = 5.0;
    let tri_h = 6.0;
    let tri = egui::epaint::PathShape::convex_polygon(
        vec![
            Pos2::new(x - tri_w, geo.track.top() - tri_h),
            Pos2::new(x + tri_w, geo.track.top() - tri_h),
            Pos2::new(x, geo.track.top()),
        ],
        Theme::PLAYHEAD,
        Stroke::NONE,
    );
    painter.add(tri);

    painter.line_segment(
        [Pos2::new(x, geo.track.top()), Pos2::new(x, geo.track.bottom())],
        Stroke::new(1.5, Theme::PLAYHEAD),
    );
    // Glow
    painter.line_segment(
        [Pos2::new(x, geo.track.top()), Pos2::new(x, geo.track.bottom())],
        Stroke::new(4.0, Theme::tint(Theme::PLAYHEAD, 30)),
    );

    painter.text(
        Pos2::new(x, geo.labels.center().y),
        egui::Align2::CENTER_CENTER,
        format_time(time),
        egui::FontId::monospace(Theme::TEXT_SMALL),
        Theme::TEXT_STRONG,
    );
}

fn draw_handle_labels(painter: &egui::Painter, geo: &TrackGeometry, segment: Segment) {
    let y = geo.labels.center().y;
    painter.text(
        Pos2::new(geo.x_for(segment.start), y),
        egui::Align2::RIGHT_CENTER,
        format_time(segment.start),
        egui::FontId::monospace(Theme::TEXT_SMALL),
        Theme::TEXT_MUTED,
    );
    painter.text(
        Pos2::new(geo.x_for(segment.end), y),
        egui::Align2::LEFT_CENTER,
        format_time(segment.end),
        egui::FontId::monospace(Theme::TEXT_SMALL),
        Theme::TEXT_MUTED,
    );
}

fn draw_toolbar(ui: &mut egui::Ui, view: &TimelineView<'_>, actions: &mut Vec<TimelineAction>) {
    let toolbar_frame = egui::Frame::none()
        .fill(Theme::SURFACE)
        .stroke(Theme::hairline())
        .inner_margin(egui::Margin::symmetric(Theme::GAP_WIDE, 0.0));

    toolbar_frame.show(ui, |ui| {
        ui.set_height(TOOLBAR_HEIGHT);
        ui.horizontal_centered(|ui| {
            ui.spacing_mut().item_spacing = Vec2::new(Theme::GAP_WIDE, 0.0);

            if ui
                .button(egui::RichText::new("+ Add segment").size(Theme::TEXT_SMALL))
                .on_hover_text("Select the first uncovered range")
                .clicked()
            {
                actions.push(TimelineAction::AddSegment);
            }
            if ui
                .button(egui::RichText::new("Reset").size(Theme::TEXT_SMALL))
                .on_hover_text("Select the whole clip")
                .clicked()
            {
                actions.push(TimelineAction::Reset);
            }

            ui.add_space(Theme::GAP);

            let undo = egui::Button::new(egui::RichText::new("\u{21B6}").size(Theme::TEXT));
            if ui.add_enabled(view.can_undo, undo).clicked() {
                actions.push(TimelineAction::Undo);
            }
            let redo = egui::Button::new(egui::RichText::new("\u{21B7}").size(Theme::TEXT));
            if ui.add_enabled(view.can_redo, redo).clicked() {
                actions.push(TimelineAction::Redo);
            }

            ui.add_space(Theme::GAP_WIDER);

            let count = view.segments.len();
            let summary = match count {
                0 => "No segments".to_owned(),
                1 => "1 segment".to_owned(),
                n => format!("{n} segments"),
            };
            ui.label(
                egui::RichText::new(summary)
                    .size(Theme::TEXT_SMALL)
                    .color(Theme::TEXT_MUTED),
            );

            if !view.overlaps.is_empty() {
                ui.label(
                    egui::RichText::new(format!("{} overlapping", view.overlaps.len()))
                        .size(Theme::TEXT_SMALL)
                        .color(Theme::OVERLAP),
                );
            }
        });
    });
}
