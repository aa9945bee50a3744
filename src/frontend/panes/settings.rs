//! Settings pane — editor configuration.

use egui::Ui;

use crate::frontend::pane_trait::Pane;
use crate::frontend::state::{AppAction, SharedState};
use crate::frontend::workspace::PaneKind;
use crate::graph::ports::HandleLayout;

/// State for the settings pane.
#[derive(Default)]
pub struct SettingsPaneState;

/// Render the settings pane.
pub fn render(shared: &mut SharedState<'_>, ui: &mut Ui) -> Vec<AppAction> {
    let mut actions = Vec::new();
    let mut changed = false;
    let editor = &mut shared.config.editor;

    ui.heading("Editor");
    ui.separator();

    ui.label("Input handle layout:");
    changed |= ui
        .radio_value(
            &mut editor.handle_layout,
            HandleLayout::Unified,
            "Unified (one handle per node)",
        )
        .changed();
    changed |= ui
        .radio_value(
            &mut editor.handle_layout,
            HandleLayout::PerField,
            "Per field (one handle per input)",
        )
        .changed();

    ui.add_space(8.0);
    changed |= ui
        .checkbox(&mut editor.tool_mode, "Tool mode")
        .on_hover_text("Surfaces tool-only fields as connectable handles")
        .changed();

    ui.add_space(8.0);
    changed |= ui
        .add(egui::Slider::new(&mut editor.corner_radius, 0.0..=16.0).text("Corner radius"))
        .changed();

    ui.separator();
    ui.heading("Appearance");
    let dark = &mut shared.app_state.ui_preferences.dark_mode;
    if ui.checkbox(dark, "Dark mode").changed() {
        ui.ctx().set_visuals(if *dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });
        changed = true;
    }

    if changed {
        actions.push(AppAction::SaveConfig);
    }

    if let Some(error) = shared.last_error.as_ref() {
        ui.separator();
        ui.colored_label(egui::Color32::RED, error);
    }

    actions
}

impl Pane for SettingsPaneState {
    fn kind(&self) -> PaneKind {
        PaneKind::Settings
    }

    fn render(&mut self, shared: &mut SharedState, ui: &mut Ui) -> Vec<AppAction> {
        render(shared, ui)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
