//! Connection validity oracle.
//!
//! A pure predicate over a candidate connection and the current graph.
//! It runs on every pointer-move frame while a gesture is active, so it
//! must stay O(edges) with no side effects. An invalid candidate is a
//! verdict, not an error — the UI surfaces it only as a dimmed handle.

use crate::graph::ports::PortDescriptor;
use crate::graph::store::WorkflowGraph;
use crate::graph::typing::TypeRegistry;

/// A tentative connection: one or both endpoints specified.
///
/// While a gesture is in progress only the anchor endpoint exists; the
/// other side is filled in per hovered handle to query the oracle.
#[derive(Debug, Clone, Default)]
pub struct ConnectionCandidate {
    pub source: Option<PortDescriptor>,
    pub target: Option<PortDescriptor>,
}

impl ConnectionCandidate {
    pub fn between(source: PortDescriptor, target: PortDescriptor) -> Self {
        Self {
            source: Some(source),
            target: Some(target),
        }
    }

    /// Orient an (anchor, other) pair into (source, target) by direction:
    /// the output side is always the source.
    pub fn oriented(anchor: &PortDescriptor, other: &PortDescriptor) -> Self {
        if anchor.kind.is_input() {
            Self::between(other.clone(), anchor.clone())
        } else {
            Self::between(anchor.clone(), other.clone())
        }
    }
}

/// Decide whether committing `candidate` would be legal right now.
///
/// Rules, in order:
/// 1. Both endpoints must exist and be correctly oriented.
/// 2. No self-loops unless a port opts in via `allows_loopback`.
/// 3. A single-connection input that already has an incoming edge rejects;
///    replacement requires explicit deletion first.
/// 4. No exact duplicate of an existing edge.
/// 5. The source's produced type must appear in the target's resolved
///    accepted set.
pub fn is_valid_connection(
    candidate: &ConnectionCandidate,
    graph: &WorkflowGraph,
    registry: &TypeRegistry,
) -> bool {
    let (Some(source), Some(target)) = (&candidate.source, &candidate.target) else {
        return false;
    };
    if source.kind.is_input() || !target.kind.is_input() {
        return false;
    }

    if source.node == target.node
        && !(source.kind.allows_loopback() || target.kind.allows_loopback())
    {
        return false;
    }

    if !target.kind.allows_multiple()
        && graph
            .edges()
            .iter()
            .any(|e| e.target == target.node && e.target_field == target.field)
    {
        return false;
    }

    if graph.edges().iter().any(|e| {
        e.source == source.node
            && e.source_field == source.field
            && e.target == target.node
            && e.target_field == target.field
    }) {
        return false;
    }

    let Some(produced) = source.kind.produces() else {
        return false;
    };
    registry.is_compatible(produced, target.kind.accepts())
}
