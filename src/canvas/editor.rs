//! Canvas editor pane — the node-and-edge canvas.
//!
//! Renders the workflow graph with custom egui painting. Supports:
//! - Pan/zoom and node repositioning
//! - Drag-to-connect and click-to-filter gestures on handles
//! - Orthogonal edge rendering with a live drag preview
//!
//! Everything gesture-related is re-derived from the store each frame;
//! the pane itself only owns view state (pan, zoom, flash tracker).

use std::collections::HashMap;
use std::time::{Duration, Instant};

use egui::{Color32, Pos2, Rect, Sense, Stroke, StrokeKind, Ui, Vec2};

use crate::canvas::handle::{end_frame_cleanup, show_handle, FlashTracker};
use crate::canvas::routing::{self, Side};
use crate::frontend::pane_trait::Pane;
use crate::frontend::state::{AppAction, SharedState};
use crate::frontend::workspace::PaneKind;
use crate::graph::id::NodeId;
use crate::graph::ports::{resolve_ports, PortDescriptor, PortKind, PortResolveOptions};

const NODE_WIDTH: f32 = 150.0;
const NODE_HEIGHT: f32 = 56.0;
const EDGE_WIDTH: f32 = 2.0;

/// State for the canvas editor pane.
pub struct CanvasEditorState {
    /// Pan offset for the canvas.
    pub pan_offset: Vec2,
    /// Zoom level.
    pub zoom: f32,
    /// Connect-flash bookkeeping; dropped with the pane.
    pub flash: FlashTracker,
}

impl Default for CanvasEditorState {
    fn default() -> Self {
        Self {
            pan_offset: Vec2::ZERO,
            zoom: 1.0,
            flash: FlashTracker::default(),
        }
    }
}

/// Per-frame geometry for one node.
struct NodeGeometry {
    id: NodeId,
    name: String,
    fill: Color32,
    description: &'static str,
    rect: Rect,
    /// Resolved ports with their screen anchor and routing side.
    anchors: Vec<(PortDescriptor, Pos2, Side)>,
}

/// Render the canvas editor pane.
pub fn render(
    state: &mut CanvasEditorState,
    shared: &mut SharedState<'_>,
    ui: &mut Ui,
) -> Vec<AppAction> {
    let mut actions = Vec::new();
    let now = Instant::now();
    state
        .flash
        .set_duration(Duration::from_millis(shared.config.editor.flash_duration_ms));
    state.flash.prune(now);

    // Toolbar
    ui.horizontal(|ui| {
        ui.heading("Canvas");
        ui.separator();
        if ui.button("Reset View").clicked() {
            state.pan_offset = Vec2::ZERO;
            state.zoom = 1.0;
        }
        ui.label(format!("{:.0}%", state.zoom * 100.0));
        ui.separator();
        ui.label(format!(
            "{} nodes, {} edges",
            shared.graph.node_count(),
            shared.graph.edges().len()
        ));
        if let Some(ctx) = &shared.graph.drag {
            ui.separator();
            ui.colored_label(ctx.color, format!("connecting: {}", ctx.type_label));
        }
    });
    ui.separator();

    let available = ui.available_rect_before_wrap();
    let (response, painter) = ui.allocate_painter(available.size(), Sense::click_and_drag());
    let canvas_rect = response.rect;

    // Fill background
    painter.rect_filled(canvas_rect, 0.0, Color32::from_gray(30));

    // Handle pan (background drag or middle mouse)
    if response.dragged_by(egui::PointerButton::Primary)
        || response.dragged_by(egui::PointerButton::Middle)
    {
        state.pan_offset += response.drag_delta();
    }

    // Handle zoom (scroll)
    if response.hovered() {
        let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll_delta != 0.0 {
            let factor = 1.0 + scroll_delta * 0.002;
            state.zoom = (state.zoom * factor).clamp(0.25, 4.0);
        }
    }

    let zoom = state.zoom;
    let origin = canvas_rect.min.to_vec2() + state.pan_offset;
    let to_screen = |world: Pos2| Pos2::new(world.x * zoom + origin.x, world.y * zoom + origin.y);

    // Resolve geometry for every live node once per frame.
    let opts = PortResolveOptions {
        layout: shared.config.editor.handle_layout,
        tool_mode: shared.config.editor.tool_mode,
    };
    let geometries: Vec<NodeGeometry> = shared
        .graph
        .nodes()
        .map(|node| {
            let rect = Rect::from_min_size(
                to_screen(node.position),
                Vec2::new(NODE_WIDTH * zoom, NODE_HEIGHT * zoom),
            );
            let ports = resolve_ports(node.id, node.kind, &node.template, shared.types, opts);
            let anchors = place_handles(rect, &ports);
            NodeGeometry {
                id: node.id,
                name: node.name.clone(),
                fill: category_color(node.kind.is_pure_source(), node.kind.is_pure_sink()),
                description: node.kind.description(),
                rect,
                anchors,
            }
        })
        .collect();

    let mut anchor_lookup: HashMap<(NodeId, &str, bool), (Pos2, Side, &PortDescriptor)> =
        HashMap::new();
    for geo in &geometries {
        for (port, pos, side) in &geo.anchors {
            anchor_lookup.insert((geo.id, port.field.as_str(), port.kind.is_input()), (
                *pos, *side, port,
            ));
        }
    }

    // Draw edges first (behind nodes)
    let corner_radius = shared.config.editor.corner_radius;
    let highlight_color = ui.visuals().selection.stroke.color;
    let mut removed_edge = None;
    for conn in shared.graph.edges() {
        let source = anchor_lookup.get(&(conn.source, conn.source_field.as_str(), false));
        let target = anchor_lookup.get(&(conn.target, conn.target_field.as_str(), true));
        let (Some((from, from_side, from_port)), Some((to, to_side, _))) = (source, target) else {
            continue;
        };

        let path = routing::route(*from, *from_side, *to, *to_side);
        let points = routing::rounded(&path, corner_radius * zoom);
        let highlighted = shared.graph.filter_highlights.contains(&conn.id);
        let color = if highlighted {
            highlight_color
        } else {
            from_port
                .kind
                .produces()
                .map(|t| shared.types.color_for_type(t))
                .unwrap_or(Color32::from_gray(150))
        };
        let width = if highlighted { 3.5 } else { EDGE_WIDTH } * zoom;
        let mid = points[points.len() / 2];
        painter.add(egui::Shape::line(points, Stroke::new(width, color)));

        // Small midpoint affordance for explicit edge deletion.
        let hit = Rect::from_center_size(mid, Vec2::splat(10.0 * zoom));
        let edge_resp = ui.interact(hit, ui.id().with(("edge", conn.id.0)), Sense::click());
        if edge_resp.hovered() {
            painter.circle_filled(mid, 4.0 * zoom, Color32::from_gray(220));
        }
        if edge_resp.clicked() {
            removed_edge = Some(conn.id);
        }
    }
    if let Some(id) = removed_edge {
        actions.push(AppAction::RemoveEdge(id));
    }

    // Live drag preview: from the originating handle to the pointer,
    // recomputed every frame.
    if let Some(ctx) = shared.graph.drag.clone() {
        let anchor = anchor_lookup.get(&(
            ctx.anchor.node,
            ctx.anchor.field.as_str(),
            ctx.anchor.kind.is_input(),
        ));
        let pointer = ui.input(|i| i.pointer.latest_pos());
        if let (Some((from, from_side, _)), Some(pointer)) = (anchor, pointer) {
            let path = routing::preview(*from, *from_side, pointer);
            let points = routing::rounded(&path, corner_radius * zoom);
            painter.add(egui::Shape::line(
                points,
                Stroke::new(EDGE_WIDTH * zoom, ctx.color),
            ));
        }
    }

    // Draw nodes and their handles
    let mut pointer_on_node = false;
    for geo in &geometries {
        let node_resp = ui
            .interact(geo.rect, ui.id().with(("node", geo.id.0)), Sense::click_and_drag())
            .on_hover_text(geo.description);
        pointer_on_node |= node_resp.hovered();

        if node_resp.drag_started_by(egui::PointerButton::Primary) {
            shared.graph.selected = Some(geo.id);
        }
        if node_resp.dragged_by(egui::PointerButton::Primary) {
            if let Some(node) = shared.graph.node_mut(geo.id) {
                node.position += node_resp.drag_delta() / zoom;
            }
        }
        if node_resp.clicked() {
            shared.graph.selected = Some(geo.id);
        }

        let is_selected = shared.graph.selected == Some(geo.id);
        let stroke = if is_selected {
            Stroke::new(3.0 * zoom, Color32::WHITE)
        } else {
            Stroke::new(1.0 * zoom, Color32::from_gray(80))
        };
        painter.rect_filled(geo.rect, 6.0 * zoom, geo.fill);
        painter.rect_stroke(geo.rect, 6.0 * zoom, stroke, StrokeKind::Outside);
        painter.text(
            geo.rect.center(),
            egui::Align2::CENTER_CENTER,
            &geo.name,
            egui::FontId::proportional(12.0 * zoom),
            Color32::WHITE,
        );

        for (port, pos, _) in &geo.anchors {
            show_handle(
                ui,
                &painter,
                *pos,
                zoom,
                port,
                shared.graph,
                shared.types,
                &mut state.flash,
                now,
            );
        }
    }

    // Frame-global gesture cleanup: any primary release ends a drag,
    // including over empty canvas, exactly once.
    let released = ui.input(|i| i.pointer.primary_released());
    end_frame_cleanup(shared.graph, released);

    // Escape cancels whatever gesture is in progress.
    if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
        shared.graph.clear_gesture();
    }

    // Clicking empty canvas deselects and cancels filter mode.
    if response.clicked() && !pointer_on_node {
        shared.graph.selected = None;
        shared.graph.clear_gesture();
    }

    // Delete removes the selected node.
    if let Some(selected) = shared.graph.selected {
        if ui.input(|i| i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace)) {
            actions.push(AppAction::RemoveNode(selected));
        }
    }

    // Keep repainting while a gesture or flash animation is live.
    if shared.graph.drag.is_some() {
        ui.ctx().request_repaint();
    } else if state.flash.any_active(now) {
        ui.ctx().request_repaint_after(Duration::from_millis(30));
    }

    actions
}

/// Screen anchor and routing side for every resolved port.
///
/// Unified inputs sit top-center; per-field inputs are evenly spaced
/// along the left edge; outputs (Success above Else) along the right.
fn place_handles(rect: Rect, ports: &[PortDescriptor]) -> Vec<(PortDescriptor, Pos2, Side)> {
    let input_count = ports.iter().filter(|p| p.kind.is_input()).count();
    let output_count = ports.len() - input_count;

    let mut input_index = 0usize;
    let mut output_index = 0usize;
    ports
        .iter()
        .map(|port| {
            let (pos, side) = match &port.kind {
                PortKind::UnifiedInput { .. } => (rect.center_top(), Side::Top),
                PortKind::GenericInput { .. } => {
                    input_index += 1;
                    let t = input_index as f32 / (input_count + 1) as f32;
                    (
                        Pos2::new(rect.left(), rect.top() + rect.height() * t),
                        Side::Left,
                    )
                }
                PortKind::SuccessOutput { .. } | PortKind::ElseOutput { .. } => {
                    output_index += 1;
                    let t = output_index as f32 / (output_count + 1) as f32;
                    (
                        Pos2::new(rect.right(), rect.top() + rect.height() * t),
                        Side::Right,
                    )
                }
            };
            (port.clone(), pos, side)
        })
        .collect()
}

/// Fill color by component category.
fn category_color(is_source: bool, is_sink: bool) -> Color32 {
    if is_source {
        Color32::from_rgb(50, 110, 50) // Green for sources
    } else if is_sink {
        Color32::from_rgb(160, 95, 35) // Orange for sinks
    } else {
        Color32::from_rgb(50, 80, 140) // Blue for transforms
    }
}

impl Pane for CanvasEditorState {
    fn kind(&self) -> PaneKind {
        PaneKind::CanvasEditor
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
