//! FlowCanvas - Main Entry Point
//!
//! Desktop visual editor for composing workflow graphs on a
//! node-and-edge canvas.

use flowcanvas_rs::{
    config::{AppConfig, AppState},
    frontend::FlowCanvasApp,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,flowcanvas_rs=trace")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting FlowCanvas");

    let config = AppConfig::load_or_default();
    let app_state = AppState::load_or_default();

    // Configure eframe options
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("FlowCanvas"),
        ..Default::default()
    };

    // Run the eframe application
    eframe::run_native(
        "FlowCanvas",
        native_options,
        Box::new(|cc| {
            // Configure egui visuals based on user preference
            let mut style = (*cc.egui_ctx.style()).clone();
            style.visuals.window_shadow.offset = [0, 0];

            if app_state.ui_preferences.dark_mode {
                cc.egui_ctx.set_visuals(egui::Visuals::dark());
            } else {
                cc.egui_ctx.set_visuals(egui::Visuals::light());
            }

            cc.egui_ctx.set_style(style);

            Ok(Box::new(FlowCanvasApp::new(cc, config, app_state)))
        }),
    )
}
