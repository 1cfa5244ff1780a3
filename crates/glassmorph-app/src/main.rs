//! Glassmorph - glass panel demos
//!
//! Entry point and main application loop.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use glassmorph_core::clock::DEFAULT_MAX_FRAME_GAP;
use glassmorph_core::{DemoConfig, FrameClock};
use glassmorph_ui::{GlassTheme, Screen, ScreenKind};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Storage key for the last opened screen.
const SCREEN_KEY: &str = "glassmorph.screen";

#[derive(Parser, Debug)]
#[command(name = "glassmorph", version, about = "Frosted glass panel demos")]
struct Cli {
    /// Screen to open: static, loop or reveal. Defaults to the last one used.
    #[arg(short, long)]
    screen: Option<ScreenKind>,

    /// JSON file with panel sizes and timings.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Glassmorph starting...");

    let config = match &cli.config {
        Some(path) => DemoConfig::load_from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => DemoConfig::default(),
    };
    if config.reduced_transparency {
        warn!("reduced transparency is on, glass panels are drawn opaque");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([400.0, 800.0])
            .with_title("Glassmorph"),
        renderer: eframe::Renderer::Wgpu,
        ..Default::default()
    };

    let requested = cli.screen;
    eframe::run_native(
        "Glassmorph",
        options,
        Box::new(move |cc| Ok(Box::new(GlassmorphApp::new(cc, config, requested)))),
    )?;

    Ok(())
}

struct GlassmorphApp {
    config: DemoConfig,
    kind: ScreenKind,
    screen: Box<dyn Screen>,
    clock: FrameClock,
}

impl GlassmorphApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        config: DemoConfig,
        requested: Option<ScreenKind>,
    ) -> Self {
        GlassTheme::apply(&cc.egui_ctx);

        let kind = requested
            .or_else(|| {
                cc.storage
                    .and_then(|storage| eframe::get_value::<ScreenKind>(storage, SCREEN_KEY))
            })
            .unwrap_or_default();
        info!(screen = %kind, "opening screen");

        let max_gap = Duration::try_from_secs_f64(config.max_frame_gap_ms / 1000.0)
            .unwrap_or(DEFAULT_MAX_FRAME_GAP);
        Self {
            screen: kind.build(&config),
            config,
            kind,
            clock: FrameClock::new(max_gap),
        }
    }

    fn switch_to(&mut self, kind: ScreenKind) {
        if kind == self.kind {
            return;
        }
        info!(from = %self.kind, to = %kind, "switching screen");
        // Dropping the old screen cancels whatever it was animating.
        self.screen = kind.build(&self.config);
        self.kind = kind;
        self.clock.reset();
    }
}

impl eframe::App for GlassmorphApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dt_ms = self.clock.frame();

        let mut next = None;
        egui::TopBottomPanel::top("screen_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for kind in ScreenKind::ALL {
                    if ui.selectable_label(self.kind == kind, kind.as_str()).clicked() {
                        next = Some(kind);
                    }
                }
                ui.separator();
                ui.label(self.screen.title());
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.screen.show(ui, dt_ms));

        if let Some(kind) = next {
            self.switch_to(kind);
        }

        if self.screen.is_animating() {
            ctx.request_repaint();
        } else {
            // Idle frames are event driven; the next animation starts from zero.
            self.clock.reset();
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, SCREEN_KEY, &self.kind);
    }
}
