//! Shared state types for the frontend
//!
//! This module defines the shared state container and action types used by
//! the workspace-based architecture. Panes receive `SharedState` via
//! borrowing and return `AppAction`s instead of mutating app state
//! directly.

use crate::config::{AppConfig, AppState};
use crate::graph::component::ComponentKind;
use crate::graph::id::{EdgeId, NodeId};
use crate::graph::store::WorkflowGraph;
use crate::graph::typing::TypeRegistry;

use super::workspace::{PaneId, PaneKind};

/// Shared state accessible by all panes (borrowed, not owned).
///
/// The workflow graph is the single source of truth the canvas renders
/// from; panes mutate it through its methods and return actions for
/// everything app-level.
pub struct SharedState<'a> {
    /// The graph state store (nodes, edges, gesture slots).
    pub graph: &'a mut WorkflowGraph,
    /// Static type hierarchy table.
    pub types: &'a TypeRegistry,

    // Configuration (read-write by panes)
    pub config: &'a mut AppConfig,
    pub app_state: &'a mut AppState,

    // Error display
    pub last_error: &'a mut Option<String>,
}

/// Actions that any pane can emit
///
/// Panes return `Vec<AppAction>` instead of mutating app state directly.
/// This enables:
/// - Testable pane logic
/// - Clear separation between UI and app plumbing
/// - Centralized action handling
#[derive(Debug, Clone)]
pub enum AppAction {
    // Graph management
    /// Place a new component on the canvas.
    AddComponent(ComponentKind),
    /// Remove a node (and its edges).
    RemoveNode(NodeId),
    /// Remove a single edge.
    RemoveEdge(EdgeId),
    /// Clear the whole workflow.
    ClearWorkflow,

    // Configuration
    /// Persist the current config to disk.
    SaveConfig,

    // Workspace actions
    /// Open/focus a singleton pane, or create if not exists.
    OpenPane(PaneKind),
    /// Close a pane (remove from dock and clean up state).
    ClosePane(PaneId),
}
