//! # FlowCanvas: Visual Workflow Editor
//!
//! A desktop node-and-edge canvas for composing executable workflow
//! graphs. Users place processing components ("nodes"), connect their
//! ports with drag or two-click gestures, and the editor keeps every
//! connection affordance honest: handles light up or dim by live type
//! compatibility, committed edges re-validate at commit time, and edge
//! paths stay strictly orthogonal.
//!
//! ## Architecture
//!
//! - **Graph**: the workflow model — component catalog, node templates,
//!   port resolution, the connection validity oracle, and the graph store
//! - **Canvas**: handle gestures and visual state, orthogonal edge
//!   routing, and the canvas pane
//! - **Frontend**: eframe/egui application shell with an egui_dock
//!   workspace (canvas, palette, settings panes)
//! - **Config**: JSON-persisted editor configuration in the platform
//!   data directory under `com.flowcanvas.flowcanvas-rs`
//!
//! ## Example
//!
//! ```ignore
//! use flowcanvas_rs::{
//!     config::{AppConfig, AppState},
//!     frontend::FlowCanvasApp,
//! };
//!
//! fn main() -> eframe::Result<()> {
//!     let config = AppConfig::load_or_default();
//!     let app_state = AppState::load_or_default();
//!
//!     let native_options = eframe::NativeOptions::default();
//!     eframe::run_native(
//!         "FlowCanvas",
//!         native_options,
//!         Box::new(|cc| Ok(Box::new(FlowCanvasApp::new(cc, config, app_state)))),
//!     )
//! }
//! ```

pub mod app;
pub mod canvas;
pub mod config;
pub mod error;
pub mod frontend;
pub mod graph;

// Re-export commonly used types
pub use app::FlowCanvasApp;
pub use config::{AppConfig, AppState, EditorConfig};
pub use error::{FlowCanvasError, Result};
pub use graph::{
    ComponentKind, ConnectionCandidate, DragContext, DragMode, EdgeId, HandleKey, HandleLayout,
    NodeId, PortDescriptor, PortKind, TypeRegistry, WorkflowGraph,
};
