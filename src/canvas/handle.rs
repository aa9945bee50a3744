//! Handle interaction and visual state.
//!
//! Every rendered handle runs the same per-frame pipeline:
//!
//! 1. its egui `Response` is translated into a [`HandleInput`] snapshot,
//! 2. [`update_handle`] advances the drag/filter state machine against
//!    the shared context slot on the store,
//! 3. [`handle_status`] and [`derive_visual`] re-derive the paint state
//!    from scratch (no incremental diffing),
//! 4. the handle is painted and given an accessible label.
//!
//! The state machine is deliberately egui-free so the gesture sequences
//! can be driven in tests without a UI.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use egui::{Color32, Painter, Pos2, Rect, Response, Sense, Ui, Vec2, WidgetInfo, WidgetType};

use crate::graph::id::EdgeId;
use crate::graph::ports::{HandleKey, PortDescriptor, PortKind};
use crate::graph::store::{DragContext, DragMode, WorkflowGraph};
use crate::graph::typing::TypeRegistry;
use crate::graph::validity::{is_valid_connection, ConnectionCandidate};

/// Handle circle radius at zoom 1.0.
pub const HANDLE_RADIUS: f32 = 6.0;
/// How long the connect flash stays up.
pub const FLASH_DURATION: Duration = Duration::from_millis(200);

const INPUT_COLOR: Color32 = Color32::from_gray(200);
const SUCCESS_COLOR: Color32 = Color32::from_rgb(60, 140, 60);
const ELSE_COLOR: Color32 = Color32::from_rgb(200, 120, 40);
const MUTED_COLOR: Color32 = Color32::from_gray(110);

const INCOMPATIBLE_OPACITY: f32 = 0.35;
const COMPATIBLE_SCALE: f32 = 1.15;
const HOVER_SCALE: f32 = 1.1;
const FLASH_SCALE: f32 = 1.3;

/// Status of a handle relative to the current gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleStatus {
    /// No gesture in progress.
    Available,
    /// Valid completion target for the in-progress gesture.
    Compatible,
    /// Not a valid completion target.
    Incompatible,
    /// This handle initiated the gesture.
    Own,
}

impl HandleStatus {
    fn label(self) -> &'static str {
        match self {
            HandleStatus::Available | HandleStatus::Own => "available",
            HandleStatus::Compatible => "compatible",
            HandleStatus::Incompatible => "incompatible",
        }
    }
}

/// Phase of the per-handle interaction machine, derived from the shared
/// context. At most one handle network-wide is in a non-idle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlePhase {
    Idle,
    Dragging,
    Filtering,
}

pub fn handle_phase(descriptor: &PortDescriptor, drag: Option<&DragContext>) -> HandlePhase {
    match drag {
        Some(ctx) if ctx.anchor == *descriptor => match ctx.mode {
            DragMode::Drag => HandlePhase::Dragging,
            DragMode::Filter => HandlePhase::Filtering,
        },
        _ => HandlePhase::Idle,
    }
}

/// Derive the gesture-relative status of one handle.
pub fn handle_status(
    descriptor: &PortDescriptor,
    graph: &WorkflowGraph,
    registry: &TypeRegistry,
) -> HandleStatus {
    match &graph.drag {
        None => HandleStatus::Available,
        Some(ctx) if ctx.anchor == *descriptor => HandleStatus::Own,
        Some(ctx) => {
            let candidate = ConnectionCandidate::oriented(&ctx.anchor, descriptor);
            if is_valid_connection(&candidate, graph, registry) {
                HandleStatus::Compatible
            } else {
                HandleStatus::Incompatible
            }
        }
    }
}

// ── Visual state ──

/// Resolved paint state for one handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleVisual {
    pub color: Color32,
    pub opacity: f32,
    pub scale: f32,
    pub glow: bool,
}

/// Base color by role: gray for inputs, green/orange for the output
/// branches.
pub fn base_color(kind: &PortKind) -> Color32 {
    match kind {
        PortKind::GenericInput { .. } | PortKind::UnifiedInput { .. } => INPUT_COLOR,
        PortKind::SuccessOutput { .. } => SUCCESS_COLOR,
        PortKind::ElseOutput { .. } => ELSE_COLOR,
    }
}

/// Pure derivation of the paint state. Hover composes with the gesture
/// status; the connect flash wins over everything while it lasts.
pub fn derive_visual(
    kind: &PortKind,
    status: HandleStatus,
    hovered: bool,
    flashing: bool,
) -> HandleVisual {
    let mut visual = HandleVisual {
        color: base_color(kind),
        opacity: 1.0,
        scale: 1.0,
        glow: false,
    };

    match status {
        HandleStatus::Available | HandleStatus::Own => {}
        HandleStatus::Compatible => {
            visual.glow = true;
            visual.scale *= COMPATIBLE_SCALE;
        }
        HandleStatus::Incompatible => {
            visual.color = MUTED_COLOR;
            visual.opacity = INCOMPATIBLE_OPACITY;
        }
    }

    if hovered {
        visual.scale *= HOVER_SCALE;
        visual.opacity = (visual.opacity + 0.15).min(1.0);
    }

    if flashing {
        visual.opacity = 1.0;
        visual.glow = true;
        visual.scale = visual.scale.max(FLASH_SCALE);
    }

    visual
}

/// Accessible description: role plus current status.
pub fn accessible_label(kind: &PortKind, status: HandleStatus) -> String {
    format!("{} ({})", kind.role_label(), status.label())
}

// ── Connect flash ──

/// Tracks per-handle edge counts and the time-boxed connect flash.
///
/// A flash fires exactly once per observed edge-count increase and
/// auto-expires after the configured duration. Dropping the tracker (pane
/// teardown) cancels every outstanding flash; spurious re-renders without
/// an actual new edge never retrigger.
#[derive(Debug)]
pub struct FlashTracker {
    last_counts: HashMap<HandleKey, usize>,
    active: HashMap<HandleKey, Instant>,
    duration: Duration,
}

impl FlashTracker {
    pub fn new(duration: Duration) -> Self {
        Self {
            last_counts: HashMap::new(),
            active: HashMap::new(),
            duration,
        }
    }

    /// Adjust the flash duration (config change); live flashes keep
    /// their start time.
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Record the current edge count for a handle; an increase starts a
    /// flash cycle.
    pub fn observe(&mut self, key: &HandleKey, count: usize, now: Instant) {
        let previous = self.last_counts.insert(key.clone(), count);
        if count > previous.unwrap_or(0) && previous.is_some() {
            self.active.insert(key.clone(), now);
        }
    }

    pub fn is_flashing(&self, key: &HandleKey, now: Instant) -> bool {
        self.active
            .get(key)
            .is_some_and(|started| now.duration_since(*started) < self.duration)
    }

    /// Drop expired flashes.
    pub fn prune(&mut self, now: Instant) {
        let duration = self.duration;
        self.active
            .retain(|_, started| now.duration_since(*started) < duration);
    }

    /// Whether any flash is live (used to schedule a repaint).
    pub fn any_active(&self, now: Instant) -> bool {
        self.active
            .values()
            .any(|started| now.duration_since(*started) < self.duration)
    }
}

impl Default for FlashTracker {
    fn default() -> Self {
        Self::new(FLASH_DURATION)
    }
}

// ── Interaction ──

/// Per-frame input snapshot for one handle.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandleInput {
    pub hovered: bool,
    /// Primary-button drag began on this handle this frame.
    pub drag_started: bool,
    /// Discrete primary click (press and release without dragging).
    pub clicked: bool,
    /// Context-menu click; never starts or completes a gesture.
    pub secondary_clicked: bool,
    /// Primary button released this frame while over this handle.
    pub released_over: bool,
}

/// What the controller decided for one handle this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleEvent {
    None,
    DragStarted,
    FilterArmed,
    Committed(EdgeId),
    Cancelled,
}

/// Advance the drag/filter state machine for one handle.
///
/// The shared context is the single source of truth: when it is empty
/// this handle may start a gesture; when this handle owns it, a second
/// click cancels filter mode; when another handle owns it, a release
/// (drag) or click (filter) over this handle attempts the commit.
pub fn update_handle(
    descriptor: &PortDescriptor,
    input: &HandleInput,
    graph: &mut WorkflowGraph,
    registry: &TypeRegistry,
) -> HandleEvent {
    if input.secondary_clicked {
        return HandleEvent::None;
    }

    let Some(ctx) = graph.drag.clone() else {
        if input.drag_started {
            graph.drag = Some(DragContext::new(
                descriptor.clone(),
                DragMode::Drag,
                registry,
            ));
            return HandleEvent::DragStarted;
        }
        if input.clicked {
            graph.drag = Some(DragContext::new(
                descriptor.clone(),
                DragMode::Filter,
                registry,
            ));
            let key = descriptor.key();
            graph.filter_highlights = graph
                .edges()
                .iter()
                .filter(|e| e.source_key == key || e.target_key == key)
                .map(|e| e.id)
                .collect();
            return HandleEvent::FilterArmed;
        }
        return HandleEvent::None;
    };

    if ctx.anchor == *descriptor {
        // Clicking the arming handle a second time cancels filter mode;
        // releasing a drag over its own origin is handled by the frame
        // cleanup.
        if ctx.mode == DragMode::Filter && input.clicked {
            graph.clear_gesture();
            return HandleEvent::Cancelled;
        }
        return HandleEvent::None;
    }

    let completes = match ctx.mode {
        DragMode::Drag => input.released_over,
        DragMode::Filter => input.clicked,
    };
    if !completes {
        return HandleEvent::None;
    }

    let candidate = ConnectionCandidate::oriented(&ctx.anchor, descriptor);
    match graph.connect(&candidate, registry) {
        Ok(id) => {
            graph.clear_gesture();
            HandleEvent::Committed(id)
        }
        Err(_) => match ctx.mode {
            // Clicking an incompatible handle cancels filter mode.
            DragMode::Filter => {
                graph.clear_gesture();
                HandleEvent::Cancelled
            }
            // An invalid drop falls through to the frame cleanup.
            DragMode::Drag => HandleEvent::None,
        },
    }
}

/// Frame-global gesture cleanup, called once after every handle has run.
///
/// This is the immediate-mode equivalent of the global pointer-up
/// listener: any primary release ends an in-progress drag, including
/// releases over empty canvas or outside the window. A commit earlier in
/// the frame has already cleared the slot, so the context is cleared
/// exactly once per drag cycle. Returns whether a gesture was cancelled.
pub fn end_frame_cleanup(graph: &mut WorkflowGraph, pointer_released: bool) -> bool {
    if !pointer_released {
        return false;
    }
    match &graph.drag {
        Some(ctx) if ctx.mode == DragMode::Drag => {
            graph.clear_gesture();
            true
        }
        _ => false,
    }
}

// ── Rendering ──

/// Render one handle: interaction, derivation, paint, accessibility.
///
/// Returns the controller's event so the editor can react to commits.
#[allow(clippy::too_many_arguments)]
pub fn show_handle(
    ui: &Ui,
    painter: &Painter,
    center: Pos2,
    zoom: f32,
    descriptor: &PortDescriptor,
    graph: &mut WorkflowGraph,
    registry: &TypeRegistry,
    flash: &mut FlashTracker,
    now: Instant,
) -> HandleEvent {
    let radius = HANDLE_RADIUS * zoom;
    let key = descriptor.key();
    let rect = Rect::from_center_size(center, Vec2::splat(radius * 4.0));
    let response = ui.interact(rect, ui.id().with(key.as_str()), Sense::click_and_drag());

    let input = handle_input_from_response(ui, &response);
    let event = update_handle(descriptor, &input, graph, registry);

    let edge_count = graph.edge_count_for(&key);
    flash.observe(&key, edge_count, now);
    let flashing = flash.is_flashing(&key, now);

    let status = handle_status(descriptor, graph, registry);
    let visual = derive_visual(&descriptor.kind, status, response.hovered(), flashing);

    paint_handle(painter, center, radius, &visual, edge_count > 0);

    let label = accessible_label(&descriptor.kind, status);
    response.widget_info(|| WidgetInfo::labeled(WidgetType::Button, true, label.clone()));

    event
}

/// Translate an egui response into the controller's input snapshot.
fn handle_input_from_response(ui: &Ui, response: &Response) -> HandleInput {
    HandleInput {
        hovered: response.hovered(),
        drag_started: response.drag_started_by(egui::PointerButton::Primary),
        clicked: response.clicked(),
        secondary_clicked: response.secondary_clicked(),
        released_over: response.hovered() && ui.input(|i| i.pointer.primary_released()),
    }
}

fn paint_handle(painter: &Painter, center: Pos2, radius: f32, visual: &HandleVisual, connected: bool) {
    let color = visual.color.gamma_multiply(visual.opacity);
    if visual.glow {
        painter.circle_filled(
            center,
            radius * visual.scale * 1.8,
            color.gamma_multiply(0.25),
        );
    }
    painter.circle_filled(center, radius * visual.scale, color);
    if connected {
        painter.circle_stroke(
            center,
            radius * visual.scale,
            egui::Stroke::new(1.5, Color32::WHITE.gamma_multiply(visual.opacity)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::component::ComponentKind;
    use crate::graph::id::NodeId;
    use crate::graph::ports::{resolve_ports, PortResolveOptions};

    fn registry() -> TypeRegistry {
        TypeRegistry::new()
    }

    /// ChatInput -> LanguageModel -> (incompatible) custom Number input.
    fn test_graph() -> (WorkflowGraph, PortDescriptor, PortDescriptor, PortDescriptor) {
        let mut graph = WorkflowGraph::new();
        let a = graph.add_node(ComponentKind::ChatInput, Pos2::new(0.0, 0.0));
        let b = graph.add_node(ComponentKind::LanguageModel, Pos2::new(200.0, 0.0));
        let c = graph.add_node(ComponentKind::DataCleaner, Pos2::new(400.0, 0.0));

        let port_of = |graph: &WorkflowGraph, id: NodeId, want_input: bool| {
            let node = graph.node(id).unwrap();
            resolve_ports(
                id,
                node.kind,
                &node.template,
                &registry(),
                PortResolveOptions::default(),
            )
            .into_iter()
            .find(|p| p.kind.is_input() == want_input)
            .unwrap()
        };

        let source = port_of(&graph, a, false);
        let target = port_of(&graph, b, true);
        let incompatible = port_of(&graph, c, true);
        (graph, source, target, incompatible)
    }

    fn drag_start() -> HandleInput {
        HandleInput {
            drag_started: true,
            hovered: true,
            ..Default::default()
        }
    }

    fn click() -> HandleInput {
        HandleInput {
            clicked: true,
            hovered: true,
            ..Default::default()
        }
    }

    fn release_over() -> HandleInput {
        HandleInput {
            released_over: true,
            hovered: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_drag_commit_cycle() {
        let (mut graph, source, target, _) = test_graph();
        let reg = registry();

        let event = update_handle(&source, &drag_start(), &mut graph, &reg);
        assert_eq!(event, HandleEvent::DragStarted);
        assert!(graph.drag.is_some());
        assert_eq!(handle_phase(&source, graph.drag.as_ref()), HandlePhase::Dragging);

        let event = update_handle(&target, &release_over(), &mut graph, &reg);
        assert!(matches!(event, HandleEvent::Committed(_)));
        assert_eq!(graph.edges().len(), 1);
        assert!(graph.drag.is_none());

        // The release that completed the commit must not clear anything
        // twice.
        assert!(!end_frame_cleanup(&mut graph, true));
    }

    #[test]
    fn test_release_over_empty_canvas_clears_exactly_once() {
        let (mut graph, source, _, _) = test_graph();
        let reg = registry();

        update_handle(&source, &drag_start(), &mut graph, &reg);
        assert!(end_frame_cleanup(&mut graph, true));
        assert!(graph.drag.is_none());
        assert!(graph.edges().is_empty());
        // Second release with no gesture is a no-op.
        assert!(!end_frame_cleanup(&mut graph, true));
    }

    #[test]
    fn test_repeated_drag_cycles_leave_no_residue() {
        let (mut graph, source, _, _) = test_graph();
        let reg = registry();

        for _ in 0..5 {
            update_handle(&source, &drag_start(), &mut graph, &reg);
            assert!(graph.drag.is_some());
            assert!(end_frame_cleanup(&mut graph, true));
            assert!(graph.drag.is_none());
        }
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_release_over_incompatible_commits_nothing() {
        let (mut graph, source, _, incompatible) = test_graph();
        let reg = registry();

        update_handle(&source, &drag_start(), &mut graph, &reg);
        let event = update_handle(&incompatible, &release_over(), &mut graph, &reg);
        assert_eq!(event, HandleEvent::None);
        assert!(graph.edges().is_empty());
        // The frame cleanup still ends the gesture.
        assert!(end_frame_cleanup(&mut graph, true));
    }

    #[test]
    fn test_filter_two_click_commit() {
        let (mut graph, source, target, _) = test_graph();
        let reg = registry();

        let event = update_handle(&source, &click(), &mut graph, &reg);
        assert_eq!(event, HandleEvent::FilterArmed);
        assert_eq!(handle_phase(&source, graph.drag.as_ref()), HandlePhase::Filtering);

        let event = update_handle(&target, &click(), &mut graph, &reg);
        assert!(matches!(event, HandleEvent::Committed(_)));
        assert!(graph.drag.is_none());
        assert!(graph.filter_highlights.is_empty());
        assert_eq!(graph.edges().len(), 1);
    }

    #[test]
    fn test_filter_same_handle_twice_cancels() {
        let (mut graph, source, _, _) = test_graph();
        let reg = registry();

        update_handle(&source, &click(), &mut graph, &reg);
        let event = update_handle(&source, &click(), &mut graph, &reg);
        assert_eq!(event, HandleEvent::Cancelled);
        assert!(graph.drag.is_none());
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_filter_incompatible_click_cancels() {
        let (mut graph, source, _, incompatible) = test_graph();
        let reg = registry();

        update_handle(&source, &click(), &mut graph, &reg);
        let event = update_handle(&incompatible, &click(), &mut graph, &reg);
        assert_eq!(event, HandleEvent::Cancelled);
        assert!(graph.drag.is_none());
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn test_right_click_never_gestures() {
        let (mut graph, source, _, _) = test_graph();
        let reg = registry();

        let input = HandleInput {
            secondary_clicked: true,
            clicked: true,
            drag_started: true,
            hovered: true,
            ..Default::default()
        };
        let event = update_handle(&source, &input, &mut graph, &reg);
        assert_eq!(event, HandleEvent::None);
        assert!(graph.drag.is_none());
    }

    #[test]
    fn test_active_gesture_ignores_foreign_drag_start() {
        let (mut graph, source, target, _) = test_graph();
        let reg = registry();

        update_handle(&source, &drag_start(), &mut graph, &reg);
        let before = graph.drag.clone().unwrap();
        // Pointer input is serial; a stray drag-start on another handle
        // must not steal the slot.
        let event = update_handle(&target, &drag_start(), &mut graph, &reg);
        assert_eq!(event, HandleEvent::None);
        assert_eq!(graph.drag.as_ref().unwrap().anchor, before.anchor);
    }

    #[test]
    fn test_status_derivation() {
        let (mut graph, source, target, incompatible) = test_graph();
        let reg = registry();

        assert_eq!(handle_status(&source, &graph, &reg), HandleStatus::Available);

        update_handle(&source, &drag_start(), &mut graph, &reg);
        assert_eq!(handle_status(&source, &graph, &reg), HandleStatus::Own);
        assert_eq!(handle_status(&target, &graph, &reg), HandleStatus::Compatible);
        assert_eq!(
            handle_status(&incompatible, &graph, &reg),
            HandleStatus::Incompatible
        );
    }

    #[test]
    fn test_visual_states() {
        let kind = PortKind::SuccessOutput {
            produces: "Message".to_string(),
        };

        let idle = derive_visual(&kind, HandleStatus::Available, false, false);
        assert_eq!(idle.color, SUCCESS_COLOR);
        assert_eq!(idle.opacity, 1.0);
        assert!(!idle.glow);

        let dim = derive_visual(&kind, HandleStatus::Incompatible, false, false);
        assert_eq!(dim.color, MUTED_COLOR);
        assert!(dim.opacity <= INCOMPATIBLE_OPACITY);

        let lit = derive_visual(&kind, HandleStatus::Compatible, false, false);
        assert!(lit.glow);
        assert!(lit.scale > 1.0);

        // Hover composes on top of the gesture status.
        let hovered_dim = derive_visual(&kind, HandleStatus::Incompatible, true, false);
        assert!(hovered_dim.scale > dim.scale);
        assert!(hovered_dim.opacity > dim.opacity);

        // The flash wins while it lasts.
        let flash = derive_visual(&kind, HandleStatus::Incompatible, false, true);
        assert_eq!(flash.opacity, 1.0);
        assert!(flash.glow);
        assert!(flash.scale >= FLASH_SCALE);
    }

    #[test]
    fn test_base_colors_by_role() {
        let input = PortKind::UnifiedInput {
            accepts: vec!["Message".to_string()],
            allows_multiple: false,
            allows_loopback: false,
        };
        assert_eq!(base_color(&input), INPUT_COLOR);
        assert_eq!(
            base_color(&PortKind::ElseOutput {
                produces: "Message".to_string()
            }),
            ELSE_COLOR
        );
    }

    #[test]
    fn test_accessible_labels() {
        let kind = PortKind::SuccessOutput {
            produces: "Message".to_string(),
        };
        assert_eq!(
            accessible_label(&kind, HandleStatus::Compatible),
            "Success Output (compatible)"
        );
        let input = PortKind::GenericInput {
            accepts: vec![],
            allows_multiple: false,
            allows_loopback: false,
        };
        assert_eq!(
            accessible_label(&input, HandleStatus::Incompatible),
            "Input (incompatible)"
        );
    }

    #[test]
    fn test_flash_fires_once_per_increase() {
        let (graph, source, _, _) = test_graph();
        let key = source.key();
        let mut flash = FlashTracker::new(Duration::from_millis(200));
        let t0 = Instant::now();

        // Baseline observation never flashes.
        flash.observe(&key, graph.edge_count_for(&key), t0);
        assert!(!flash.is_flashing(&key, t0));

        // An increase flashes...
        flash.observe(&key, 1, t0);
        assert!(flash.is_flashing(&key, t0));

        // ...but a spurious re-render at the same count does not extend it.
        let later = t0 + Duration::from_millis(150);
        flash.observe(&key, 1, later);
        assert!(flash.is_flashing(&key, later));
        let expired = t0 + Duration::from_millis(250);
        flash.observe(&key, 1, expired);
        assert!(!flash.is_flashing(&key, expired));
    }

    #[test]
    fn test_flash_expires_and_prunes() {
        let (_, source, _, _) = test_graph();
        let key = source.key();
        let mut flash = FlashTracker::new(Duration::from_millis(200));
        let t0 = Instant::now();

        flash.observe(&key, 0, t0);
        flash.observe(&key, 1, t0);
        assert!(flash.any_active(t0));

        let after = t0 + Duration::from_millis(300);
        assert!(!flash.is_flashing(&key, after));
        flash.prune(after);
        assert!(!flash.any_active(after));
    }

    #[test]
    fn test_flash_retriggers_on_next_increase() {
        let (_, source, _, _) = test_graph();
        let key = source.key();
        let mut flash = FlashTracker::new(Duration::from_millis(200));
        let t0 = Instant::now();

        flash.observe(&key, 0, t0);
        flash.observe(&key, 1, t0);
        let gap = t0 + Duration::from_millis(500);
        assert!(!flash.is_flashing(&key, gap));
        flash.observe(&key, 2, gap);
        assert!(flash.is_flashing(&key, gap));
    }
}
