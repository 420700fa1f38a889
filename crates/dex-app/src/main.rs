//! Main application entry point

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Parser;
use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dex_core::AnimatedContentController;
use dex_data::{catalog_from_config, SourceKind, ViewerConfig};
use dex_ui::{navigation_from_keys, EntryPanel, Theme};

mod demo;

/// Browse the catalogue one entry at a time
#[derive(Parser, Debug, Default, PartialEq)]
#[command(name = "dexviewer", author, version, about, long_about = None)]
struct CliOptions {
    /// Viewer configuration file (JSON); defaults apply when absent
    #[arg(env = "DEXVIEWER_CONFIG")]
    config: Option<PathBuf>,

    /// Serve the built-in demo entries instead of the configured source
    #[arg(long)]
    demo: bool,
}

/// Main application state
struct DexViewerApp {
    /// Entry panel driving the controller
    panel: EntryPanel,

    /// Shared with the panel; torn down on exit
    controller: Arc<AnimatedContentController>,

    /// Tokio runtime hosting debounce, fetch and reveal tasks
    _runtime: tokio::runtime::Runtime,
}

impl DexViewerApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        runtime: tokio::runtime::Runtime,
        controller: Arc<AnimatedContentController>,
    ) -> Self {
        dex_ui::apply_theme(&cc.egui_ctx, &Theme::default());

        controller.start();

        Self {
            panel: EntryPanel::new(controller.clone()),
            controller,
            _runtime: runtime,
        }
    }
}

impl eframe::App for DexViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Arrow keys belong to the lookup field while it has focus
        if !ctx.wants_keyboard_input() {
            if let Some(step) = ctx.input(navigation_from_keys) {
                self.controller.on_navigate(step);
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.set_max_width(520.0);
                self.panel.show(ui);
            });
        });
    }
}

impl Drop for DexViewerApp {
    fn drop(&mut self) {
        self.controller.teardown();
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(options: &CliOptions) -> Result<ViewerConfig> {
    let mut config = ViewerConfig::load_or_default(options.config.as_deref())
        .context("Failed to load viewer configuration")?;

    if options.demo {
        config.source = SourceKind::Demo;
    }
    if config.source == SourceKind::Demo {
        config.catalog_size = config.catalog_size.min(demo::DEMO_SIZE);
    }
    Ok(config)
}

fn main() -> Result<()> {
    init_tracing();

    let options = CliOptions::parse();
    let config = load_config(&options)?;
    info!(source = ?config.source, catalog_size = config.catalog_size, "Starting dex viewer");

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let catalog = {
        let _guard = runtime.enter();
        catalog_from_config(&config, demo::demo_catalog)?
    };
    let controller = Arc::new(AnimatedContentController::new(
        catalog,
        config.controller_settings()?,
        runtime.handle().clone(),
    ));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([560.0, 640.0])
            .with_min_inner_size([400.0, 480.0]),
        default_theme: eframe::Theme::Dark,
        persist_window: false,
        ..Default::default()
    };

    eframe::run_native(
        "Dex Viewer",
        options,
        Box::new(move |cc| Box::new(DexViewerApp::new(cc, runtime, controller))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
