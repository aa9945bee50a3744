//! Component palette pane — place new nodes on the canvas.

use egui::Ui;

use crate::frontend::pane_trait::Pane;
use crate::frontend::state::{AppAction, SharedState};
use crate::frontend::workspace::PaneKind;
use crate::graph::component::ComponentKind;

/// State for the component palette pane.
#[derive(Default)]
pub struct PalettePaneState {
    /// Filter string for the component list.
    pub search: String,
}

/// Render the palette pane.
pub fn render(
    state: &mut PalettePaneState,
    _shared: &mut SharedState<'_>,
    ui: &mut Ui,
) -> Vec<AppAction> {
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        ui.label("Search:");
        ui.text_edit_singleline(&mut state.search);
    });
    ui.separator();

    let query = state.search.to_lowercase();
    egui::ScrollArea::vertical().show(ui, |ui| {
        for kind in ComponentKind::all() {
            if !query.is_empty() && !kind.display_name().to_lowercase().contains(&query) {
                continue;
            }
            if ui
                .button(kind.display_name())
                .on_hover_text(kind.description())
                .clicked()
            {
                actions.push(AppAction::AddComponent(*kind));
            }
        }
    });

    actions
}

impl Pane for PalettePaneState {
    fn kind(&self) -> PaneKind {
        PaneKind::Palette
    }

    fn render(&mut self, shared: &mut SharedState, ui: &mut Ui) -> Vec<AppAction> {
        render(self, shared, ui)
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
