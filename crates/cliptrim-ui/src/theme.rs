//! Colors and metrics for the trim surface.
//!
//! Colors are named by the role they play on the timeline rather than by
//! hue, so the surface code reads `Theme::PLAYHEAD` and not "red".

use egui::{Color32, Margin, Rounding, Stroke};

pub struct Theme;

impl Theme {
    pub const TEXT_SMALL: f32 = 11.0;
    pub const TEXT: f32 = 13.0;
    pub const TEXT_LARGE: f32 = 15.0;

    pub const GAP: f32 = 4.0;
    pub const GAP_WIDE: f32 = 8.0;
    pub const GAP_WIDER: f32 = 16.0;

    pub const CORNER: f32 = 5.0;
    pub const HAIRLINE: f32 = 0.5;
    pub const OUTLINE: f32 = 1.0;

    /// Panels and bars.
    pub const SURFACE: Color32 = Color32::from_rgb(24, 26, 31);
    /// Empty track behind the segments.
    pub const TRACK: Color32 = Color32::from_rgb(33, 36, 43);
    /// Split/delete buttons.
    pub const CONTROL: Color32 = Color32::from_rgb(46, 50, 60);
    /// Dark notch drawn on each boundary handle.
    pub const GRIP: Color32 = Color32::from_rgb(14, 15, 18);
    pub const BORDER: Color32 = Color32::from_rgb(58, 62, 74);

    pub const SEGMENT: Color32 = Color32::from_rgb(64, 170, 150);
    pub const OVERLAP: Color32 = Color32::from_rgb(236, 172, 60);
    pub const PLAYHEAD: Color32 = Color32::from_rgb(240, 84, 80);
    pub const DANGER: Color32 = Color32::from_rgb(222, 96, 96);

    pub const TEXT_STRONG: Color32 = Color32::from_gray(232);
    pub const TEXT_BODY: Color32 = Color32::from_gray(160);
    pub const TEXT_MUTED: Color32 = Color32::from_gray(104);

    /// `color` at the given opacity.
    pub fn tint(color: Color32, alpha: u8) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
    }

    pub fn rounding() -> Rounding {
        Rounding::same(Self::CORNER)
    }

    pub fn hairline() -> Stroke {
        Stroke::new(Self::HAIRLINE, Self::BORDER)
    }

    /// Frame for the transport and confirm bars.
    pub fn bar_frame() -> egui::Frame {
        egui::Frame::none()
            .fill(Self::SURFACE)
            .stroke(Self::hairline())
            .inner_margin(Margin::symmetric(Self::GAP_WIDE + Self::GAP, Self::GAP))
    }

    /// Dark visuals with the segment color as the accent.
    pub fn apply(ctx: &egui::Context) {
        ctx.style_mut(|style| {
            let mut visuals = egui::Visuals::dark();
            visuals.panel_fill = Self::SURFACE;
            visuals.extreme_bg_color = Self::TRACK;
            visuals.selection.bg_fill = Self::tint(Self::SEGMENT, 48);
            visuals.selection.stroke = Stroke::new(Self::OUTLINE, Self::SEGMENT);
            visuals.widgets.inactive.bg_fill = Self::CONTROL;
            visuals.widgets.inactive.weak_bg_fill = Self::CONTROL;
            visuals.widgets.hovered.bg_stroke = Stroke::new(Self::OUTLINE, Self::SEGMENT);
            for widget in [
                &mut visuals.widgets.inactive,
                &mut visuals.widgets.hovered,
                &mut visuals.widgets.active,
            ] {
                widget.rounding = Self::rounding();
            }
            style.visuals = visuals;
        });
    }
}
