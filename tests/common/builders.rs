//! Test data builders for creating workflow graphs

use egui::Pos2;
use flowcanvas_rs::graph::ports::{resolve_ports, PortResolveOptions};
use flowcanvas_rs::{ComponentKind, NodeId, PortDescriptor, TypeRegistry, WorkflowGraph};

/// Builder for creating test graphs with staggered node positions
pub struct GraphBuilder {
    graph: WorkflowGraph,
    next_x: f32,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            graph: WorkflowGraph::new(),
            next_x: 0.0,
        }
    }

    pub fn add(&mut self, kind: ComponentKind) -> NodeId {
        let id = self.graph.add_node(kind, Pos2::new(self.next_x, 0.0));
        self.next_x += 200.0;
        id
    }

    pub fn build(self) -> WorkflowGraph {
        self.graph
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a node's ports with the default (unified) layout.
pub fn ports_of(graph: &WorkflowGraph, id: NodeId) -> Vec<PortDescriptor> {
    let node = graph.node(id).expect("node exists");
    resolve_ports(
        id,
        node.kind,
        &node.template,
        &TypeRegistry::new(),
        PortResolveOptions::default(),
    )
}

/// First output port of a node.
pub fn output_port(graph: &WorkflowGraph, id: NodeId) -> PortDescriptor {
    ports_of(graph, id)
        .into_iter()
        .find(|p| !p.kind.is_input())
        .expect("node has an output port")
}

/// First input port of a node.
pub fn input_port(graph: &WorkflowGraph, id: NodeId) -> PortDescriptor {
    ports_of(graph, id)
        .into_iter()
        .find(|p| p.kind.is_input())
        .expect("node has an input port")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_builder() {
        let mut builder = GraphBuilder::new();
        let a = builder.add(ComponentKind::ChatInput);
        let b = builder.add(ComponentKind::ChatOutput);
        let graph = builder.build();

        assert_eq!(graph.node_count(), 2);
        assert!(graph.node(a).unwrap().position.x < graph.node(b).unwrap().position.x);
    }
}
