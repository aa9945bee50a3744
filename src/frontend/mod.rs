//! Frontend module for egui UI
//!
//! This module provides the main UI components using eframe/egui.
//!
//! # Architecture
//!
//! The frontend uses an egui_dock workspace where every UI element is a
//! pane: the node canvas, the component palette, and settings. Panes can
//! be rearranged via drag-and-drop docking. Panes borrow `SharedState`
//! per frame and return `AppAction`s for the app to apply.
//!
//! # Main Types
//!
//! - [`FlowCanvasApp`] - Main application state implementing [`eframe::App`]
//! - [`Workspace`] - Dock state and pane management

pub mod pane_registry;
pub mod pane_trait;
pub mod panes;
pub mod state;
pub mod workspace;

pub use state::{AppAction, SharedState};

use egui::Pos2;

use crate::config::{AppConfig, AppState};
use crate::graph::store::WorkflowGraph;
use crate::graph::typing::TypeRegistry;
use workspace::tab_viewer::WorkspaceTabViewer;
use workspace::{PaneKind, Workspace};

/// Main application state for the workflow editor
pub struct FlowCanvasApp {
    // === Shared State ===
    graph: WorkflowGraph,
    types: TypeRegistry,
    config: AppConfig,
    app_state: AppState,
    last_error: Option<String>,

    // === Workspace ===
    workspace: Workspace,

    /// Stagger counter for palette-placed nodes.
    spawn_slot: u32,
}

impl FlowCanvasApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig, app_state: AppState) -> Self {
        // Configure fonts and styles
        let mut style = (*cc.egui_ctx.style()).clone();
        style.text_styles.iter_mut().for_each(|(_, font_id)| {
            font_id.size *= app_state.ui_preferences.font_scale;
        });
        cc.egui_ctx.set_style(style);

        // Build workspace with default layout
        let mut workspace = Workspace::new();
        let dock_state = workspace::default_layout::build_default_layout(&mut workspace);
        workspace.dock_state = dock_state;

        Self {
            graph: WorkflowGraph::new(),
            types: TypeRegistry::new(),
            config,
            app_state,
            last_error: None,
            workspace,
            spawn_slot: 0,
        }
    }

    fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::AddComponent(kind) => {
                let position = self.next_spawn_position();
                self.graph.add_node(kind, position);
            }
            AppAction::RemoveNode(id) => {
                if let Err(e) = self.graph.remove_node(id) {
                    tracing::warn!("Failed to remove node: {}", e);
                }
            }
            AppAction::RemoveEdge(id) => {
                if let Err(e) = self.graph.remove_edge(id) {
                    tracing::warn!("Failed to remove edge: {}", e);
                }
            }
            AppAction::ClearWorkflow => {
                self.graph = WorkflowGraph::new();
                self.spawn_slot = 0;
            }
            AppAction::SaveConfig => {
                if let Err(e) = self.config.save() {
                    tracing::warn!("Failed to save config: {}", e);
                    self.last_error = Some(format!("Failed to save config: {}", e));
                }
                if let Err(e) = self.app_state.save() {
                    tracing::warn!("Failed to save app state: {}", e);
                }
            }
            AppAction::OpenPane(kind) => {
                if let Some(id) = self.workspace.find_singleton(kind) {
                    // Focus existing pane
                    if let Some(tab_location) = self.workspace.dock_state.find_tab(&id) {
                        self.workspace.dock_state.set_active_tab(tab_location);
                    }
                } else {
                    let name = self.workspace.display_name(kind);
                    let id = self.workspace.register_pane(kind, name);
                    self.workspace.dock_state.push_to_first_leaf(id);
                }
            }
            AppAction::ClosePane(id) => {
                self.workspace.remove_pane(id);
            }
        }
    }

    /// Stagger freshly placed nodes so they never stack exactly.
    fn next_spawn_position(&mut self) -> Pos2 {
        let slot = self.spawn_slot;
        self.spawn_slot += 1;
        Pos2::new(
            60.0 + (slot % 5) as f32 * 190.0,
            60.0 + ((slot / 5) % 6) as f32 * 110.0,
        )
    }
}

impl eframe::App for FlowCanvasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("New Workflow").clicked() {
                        self.handle_action(AppAction::ClearWorkflow);
                        ui.close();
                    }
                });

                ui.menu_button("View", |ui| {
                    let kinds: Vec<(PaneKind, &'static str)> = self
                        .workspace
                        .registry_kinds()
                        .map(|info| (info.kind, info.display_name))
                        .collect();
                    for (kind, name) in kinds {
                        if ui.button(name).clicked() {
                            self.handle_action(AppAction::OpenPane(kind));
                            ui.close();
                        }
                    }
                });

                // Right-aligned: gesture status
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(drag) = &self.graph.drag {
                        ui.colored_label(drag.color, format!("connecting {}", drag.type_label));
                    } else {
                        ui.label(format!(
                            "{} nodes · {} edges",
                            self.graph.node_count(),
                            self.graph.edges().len()
                        ));
                    }
                });
            });
        });

        // Dock workspace
        {
            let mut viewer = WorkspaceTabViewer {
                graph: &mut self.graph,
                types: &self.types,
                config: &mut self.config,
                app_state: &mut self.app_state,
                last_error: &mut self.last_error,
                pane_states: &mut self.workspace.pane_states,
                pane_entries: &self.workspace.pane_entries,
                actions: Vec::new(),
            };

            egui_dock::DockArea::new(&mut self.workspace.dock_state)
                .style(egui_dock::Style::from_egui(ctx.style().as_ref()))
                .show(ctx, &mut viewer);

            let actions = viewer.actions;
            for action in actions {
                self.handle_action(action);
            }
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Err(e) = self.app_state.save() {
            tracing::warn!("Failed to save app state: {}", e);
        }
        if let Err(e) = self.config.save() {
            tracing::warn!("Failed to save config: {}", e);
        }
    }
}
