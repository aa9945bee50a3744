//! Pane registry — data-driven pane registration.
//!
//! The registry is the single source of truth for all pane kinds:
//! display names and factory functions. The View menu and workspace pane
//! creation are driven from this data.

use crate::canvas::editor::CanvasEditorState;
use crate::frontend::pane_trait::Pane;
use crate::frontend::panes::{PalettePaneState, SettingsPaneState};
use crate::frontend::workspace::PaneKind;

/// Metadata for a pane kind, including its factory function.
pub struct PaneKindInfo {
    pub kind: PaneKind,
    pub display_name: &'static str,
    pub factory: fn() -> Box<dyn Pane>,
}

/// Build the pane registry with all known pane kinds.
pub fn build_registry() -> Vec<PaneKindInfo> {
    vec![
        PaneKindInfo {
            kind: PaneKind::CanvasEditor,
            display_name: "Canvas",
            factory: || Box::new(CanvasEditorState::default()),
        },
        PaneKindInfo {
            kind: PaneKind::Palette,
            display_name: "Components",
            factory: || Box::new(PalettePaneState::default()),
        },
        PaneKindInfo {
            kind: PaneKind::Settings,
            display_name: "Settings",
            factory: || Box::new(SettingsPaneState::default()),
        },
    ]
}
