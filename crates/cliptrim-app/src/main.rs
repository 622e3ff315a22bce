//! ClipTrim - select time ranges of a clip on an interactive timeline
//!
//! Entry point and main application loop.

use anyhow::{Context, Result};
use clap::Parser;
use cliptrim_core::TrimConfig;
use cliptrim_ui::{
    show_timeline, AddOutcome, ClockPlayback, PlaybackHandle, Theme, TimelineAction,
    TimelineState, TransportControls, TrimSession,
};
use eframe::egui;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const DEFAULT_DURATION: f64 = 60.0;

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("ClipTrim starting...");

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => TrimConfig::load_from_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => TrimConfig::default(),
    };

    let mut session = TrimSession::new(ClockPlayback::new(args.duration), None, config)?;
    session.on_change(|segments| debug!(segments = segments.len(), "Segments changed"));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 320.0])
            .with_title("ClipTrim"),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    eframe::run_native(
        "ClipTrim",
        options,
        Box::new(move |cc| Ok(Box::new(ClipTrimApp::new(cc, session)))),
    )?;

    Ok(())
}

// ── Command line ─────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "cliptrim")]
#[command(version, about = "Select time ranges of a clip on an interactive timeline")]
struct Args {
    /// Clip length in seconds
    #[arg(default_value_t = DEFAULT_DURATION)]
    duration: f64,

    /// Path to a JSON trim config
    #[arg(short, long)]
    config: Option<PathBuf>,
}

// ── Application ──────────────────────────────────────────────────

struct ClipTrimApp {
    session: TrimSession<ClockPlayback>,
    timeline: TimelineState,
    transport: TransportControls,
    last_tick: Instant,
    status: Option<String>,
}

impl ClipTrimApp {
    fn new(cc: &eframe::CreationContext<'_>, session: TrimSession<ClockPlayback>) -> Self {
        Theme::apply(&cc.egui_ctx);
        Self {
            session,
            timeline: TimelineState::default(),
            transport: TransportControls::new(),
            last_tick: Instant::now(),
            status: None,
        }
    }

    fn dispatch(&mut self, action: TimelineAction) {
        match action {
            TimelineAction::AddSegment => {
                self.status = match self.session.add_segment() {
                    AddOutcome::FullyCovered => Some("The whole clip is already selected".into()),
                    AddOutcome::Added | AddOutcome::Blocked => None,
                };
            }
            other => self.session.handle(other),
        }
    }

    /// Pause and print the selected ranges as JSON.
    fn confirm(&mut self) {
        if !self.session.playback().is_paused() {
            self.session.toggle_play();
        }
        let ranges = self.session.export();
        match serde_json::to_string(&ranges) {
            Ok(json) => {
                println!("{json}");
                info!(ranges = ranges.len(), "Selection confirmed");
                self.status = Some(format!("Exported {} range(s)", ranges.len()));
            }
            Err(e) => self.status = Some(format!("Export failed: {e}")),
        }
    }

    fn shortcuts(&self, ctx: &egui::Context) -> Vec<TimelineAction> {
        ctx.input(|i| {
            let mut actions = Vec::new();
            if i.key_pressed(egui::Key::Space) {
                actions.push(TimelineAction::TogglePlay);
            }
            if i.modifiers.command && i.key_pressed(egui::Key::Z) {
                actions.push(if i.modifiers.shift {
                    TimelineAction::Redo
                } else {
                    TimelineAction::Undo
                });
            }
            actions
        })
    }
}

impl eframe::App for ClipTrimApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Advance playback
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick).as_secs_f64();
        self.last_tick = now;
        self.session.playback_mut().advance(dt);
        self.session.pump();
        if self.session.is_playing() {
            ctx.request_repaint();
        }

        let mut actions = self.shortcuts(ctx);

        // Transport
        egui::TopBottomPanel::top("transport")
            .frame(Theme::bar_frame())
            .show(ctx, |ui| {
                ui.add_space(Theme::GAP);
                if let Some(action) = self.transport.show(
                    ui,
                    self.session.is_playing(),
                    self.session.current_time(),
                    self.session.duration(),
                ) {
                    actions.push(action);
                }
                ui.add_space(Theme::GAP);
            });

        // Confirm bar
        let mut confirm = false;
        egui::TopBottomPanel::bottom("confirm")
            .frame(Theme::bar_frame())
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("Done").clicked() {
                        confirm = true;
                    }
                    if let Some(status) = &self.status {
                        ui.label(
                            egui::RichText::new(status)
                                .size(Theme::TEXT_SMALL)
                                .color(Theme::TEXT_MUTED),
                        );
                    }
                });
            });

        // Timeline
        egui::CentralPanel::default().show(ctx, |ui| {
            let view = self.session.view();
            actions.extend(show_timeline(ui, &view, &mut self.timeline));
        });

        for action in actions {
            self.dispatch(action);
        }
        if confirm {
            self.confirm();
        }
    }
}
