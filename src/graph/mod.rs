//! Workflow graph model.
//!
//! The logical side of the editor: component catalog, node templates,
//! port resolution, the connection validity oracle, and the graph store
//! the canvas renders from.
//!
//! # Design
//!
//! - **Resolve once** — templates resolve into `PortDescriptor`s at render
//!   time, and render code never re-inspects template fields ad hoc.
//! - **Verdicts, not errors** — connection validity is a pure predicate;
//!   only the commit path surfaces a `GraphError`.
//! - **Single gesture slot** — the shared drag/filter context lives on the
//!   store as one `Option`, written by the gesturing handle only.

pub mod component;
pub mod id;
pub mod ports;
pub mod store;
pub mod template;
pub mod typing;
pub mod validity;

pub use component::ComponentKind;
pub use id::{EdgeId, NodeId};
pub use ports::{
    resolve_ports, visible_fields, HandleKey, HandleLayout, PortDescriptor, PortKind,
    PortResolveOptions,
};
pub use store::{Connection, DragContext, DragMode, GraphError, WorkflowGraph, WorkflowNode};
pub use template::{template_for, FieldDescriptor, NodeTemplate};
pub use typing::{TypeFamily, TypeRegistry, GENERIC_COLOR, MIXED_COLOR};
pub use validity::{is_valid_connection, ConnectionCandidate};
