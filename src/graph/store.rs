//! The workflow graph store.
//!
//! Owns the node and edge collections plus the two transient gesture
//! slots (the shared drag/filter context and the filter-highlight list).
//! The canvas only reads collections; mutation goes through the store
//! methods so that every committed edge has been re-validated by the
//! oracle at commit time.

use egui::{Color32, Pos2};
use thiserror::Error;

use crate::graph::component::ComponentKind;
use crate::graph::id::{EdgeId, NodeId};
use crate::graph::ports::{HandleKey, PortDescriptor};
use crate::graph::template::{template_for, NodeTemplate};
use crate::graph::typing::TypeRegistry;
use crate::graph::validity::{is_valid_connection, ConnectionCandidate};

/// Errors from store mutations.
#[derive(Error, Debug)]
pub enum GraphError {
    /// The oracle refused the candidate at commit time.
    #[error("Invalid connection")]
    InvalidConnection,

    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("Unknown edge: {0}")]
    UnknownEdge(EdgeId),
}

/// One placed component.
#[derive(Debug, Clone)]
pub struct WorkflowNode {
    pub id: NodeId,
    pub kind: ComponentKind,
    /// Display label, unique-ified per kind ("Prompt", "Prompt 2", ...).
    pub name: String,
    pub template: NodeTemplate,
    /// Canvas position in world coordinates.
    pub position: Pos2,
    /// Whether this slot has been deleted (kept for stable NodeIds).
    deleted: bool,
}

/// A committed edge between two handles.
///
/// Handle keys embed the full port descriptors so validity can be
/// recomputed from the edge alone; node/field pairs are kept unpacked for
/// cheap per-frame scans.
#[derive(Debug, Clone)]
pub struct Connection {
    pub id: EdgeId,
    pub source: NodeId,
    pub source_field: String,
    pub target: NodeId,
    pub target_field: String,
    pub source_key: HandleKey,
    pub target_key: HandleKey,
}

/// Gesture flavor carried by the shared context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Press-and-hold drag toward a drop target.
    Drag,
    /// Two-click connect: first click armed this anchor.
    Filter,
}

/// The process-wide in-progress connection attempt.
///
/// At most one exists at a time; it lives in `WorkflowGraph::drag` and is
/// written only by the handle that owns the gesture. Every other handle
/// re-derives its visual state from it each frame. The missing endpoint
/// is supplied only at commit.
#[derive(Debug, Clone)]
pub struct DragContext {
    pub anchor: PortDescriptor,
    pub mode: DragMode,
    /// Type label shown alongside the preview.
    pub type_label: String,
    /// Stroke color for the preview edge.
    pub color: Color32,
}

impl DragContext {
    pub fn new(anchor: PortDescriptor, mode: DragMode, registry: &TypeRegistry) -> Self {
        let color = match anchor.kind.produces() {
            Some(produced) => registry.color_for_type(produced),
            None => registry.display_color(anchor.kind.accepts()),
        };
        let type_label = anchor.type_label();
        Self {
            anchor,
            mode,
            type_label,
            color,
        }
    }

    /// Whether the anchored endpoint is the source side.
    pub fn anchor_is_output(&self) -> bool {
        !self.anchor.kind.is_input()
    }
}

/// The graph state store consumed by the canvas.
#[derive(Debug, Default)]
pub struct WorkflowGraph {
    nodes: Vec<WorkflowNode>,
    edges: Vec<Connection>,
    next_edge: u32,
    /// Shared drag/filter slot; `None` means no gesture in progress.
    pub drag: Option<DragContext>,
    /// Edges highlighted while filter mode is armed.
    pub filter_highlights: Vec<EdgeId>,
    /// Currently selected node, if any.
    pub selected: Option<NodeId>,
}

impl WorkflowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Nodes ──

    /// Place a new component on the canvas. Returns its NodeId.
    pub fn add_node(&mut self, kind: ComponentKind, position: Pos2) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let existing = self.nodes().filter(|n| n.kind == kind).count();
        let name = if existing == 0 {
            kind.display_name().to_string()
        } else {
            format!("{} {}", kind.display_name(), existing + 1)
        };
        self.nodes.push(WorkflowNode {
            id,
            kind,
            name,
            template: template_for(kind),
            position,
            deleted: false,
        });
        tracing::debug!("added node {:?} ({})", id, kind);
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&WorkflowNode> {
        self.nodes
            .get(id.index())
            .filter(|n| !n.deleted)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut WorkflowNode> {
        self.nodes
            .get_mut(id.index())
            .filter(|n| !n.deleted)
    }

    /// Iterate live nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &WorkflowNode> {
        self.nodes.iter().filter(|n| !n.deleted)
    }

    pub fn node_count(&self) -> usize {
        self.nodes().count()
    }

    /// Remove a node and every edge touching it.
    pub fn remove_node(&mut self, id: NodeId) -> Result<(), GraphError> {
        let node = self
            .nodes
            .get_mut(id.index())
            .filter(|n| !n.deleted)
            .ok_or(GraphError::UnknownNode(id))?;
        node.deleted = true;
        let before = self.edges.len();
        self.edges.retain(|e| e.source != id && e.target != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
        tracing::debug!(
            "removed node {:?} and {} attached edge(s)",
            id,
            before - self.edges.len()
        );
        Ok(())
    }

    // ── Edges ──

    pub fn edges(&self) -> &[Connection] {
        &self.edges
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Connection> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn remove_edge(&mut self, id: EdgeId) -> Result<(), GraphError> {
        let before = self.edges.len();
        self.edges.retain(|e| e.id != id);
        if self.edges.len() == before {
            return Err(GraphError::UnknownEdge(id));
        }
        Ok(())
    }

    /// Commit a candidate connection.
    ///
    /// The oracle re-runs on the full pair at this moment; a stale verdict
    /// from earlier in the gesture is never trusted.
    pub fn connect(
        &mut self,
        candidate: &ConnectionCandidate,
        registry: &TypeRegistry,
    ) -> Result<EdgeId, GraphError> {
        if !is_valid_connection(candidate, self, registry) {
            tracing::debug!("rejected connection candidate at commit time");
            return Err(GraphError::InvalidConnection);
        }
        // Valid candidates always carry both endpoints.
        let (Some(source), Some(target)) = (&candidate.source, &candidate.target) else {
            return Err(GraphError::InvalidConnection);
        };

        let id = EdgeId(self.next_edge);
        self.next_edge += 1;
        self.edges.push(Connection {
            id,
            source: source.node,
            source_field: source.field.clone(),
            target: target.node,
            target_field: target.field.clone(),
            source_key: source.key(),
            target_key: target.key(),
        });
        tracing::info!(
            "connected {:?}.{} -> {:?}.{}",
            source.node,
            source.field,
            target.node,
            target.field
        );
        Ok(id)
    }

    /// Number of committed edges attached to a handle (either end).
    pub fn edge_count_for(&self, key: &HandleKey) -> usize {
        self.edges
            .iter()
            .filter(|e| &e.source_key == key || &e.target_key == key)
            .count()
    }

    // ── Gesture slots ──

    /// Clear the shared drag/filter context and the highlight list.
    pub fn clear_gesture(&mut self) {
        self.drag = None;
        self.filter_highlights.clear();
    }
}
