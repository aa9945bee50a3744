//! Default workspace layout
//!
//! Builds the initial dock layout with the component palette on the left
//! and the canvas (with a settings tab behind it) filling the rest.

use egui_dock::{DockState, NodeIndex};

use super::{PaneKind, Workspace};

/// Build the default dock layout and return the DockState.
///
/// Layout:
/// ```text
/// ┌────────────┬──────────────────────────────────┐
/// │ Components │ [Canvas]  [Settings]             │
/// │            │                                  │
/// │            │            node canvas           │
/// │            │                                  │
/// └────────────┴──────────────────────────────────┘
/// ```
pub fn build_default_layout(workspace: &mut Workspace) -> DockState<super::PaneId> {
    let canvas_id = workspace.register_pane(PaneKind::CanvasEditor, "Canvas");
    let palette_id = workspace.register_pane(PaneKind::Palette, "Components");
    let settings_id = workspace.register_pane(PaneKind::Settings, "Settings");

    // Start with the canvas as the main tab
    let mut dock = DockState::new(vec![canvas_id]);

    // Add settings as a second tab (behind the canvas)
    dock.push_to_first_leaf(settings_id);

    // Split left 20% for the component palette
    dock.main_surface_mut()
        .split_left(NodeIndex::root(), 0.2, vec![palette_id]);

    dock
}
