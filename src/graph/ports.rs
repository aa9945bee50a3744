//! Port aggregation — from node templates to renderable handles.
//!
//! Each node's template is resolved once per render into the list of
//! `PortDescriptor`s the canvas draws: which fields surface as input
//! handles (filtered and ordered), whether inputs collapse into one
//! unified handle, and which Success/Else outputs the node carries.
//! The resolved descriptor also serializes into the `HandleKey` embedded
//! in edges, so connection validity can be recomputed from an edge alone.

use serde::{Deserialize, Serialize};

use crate::graph::component::ComponentKind;
use crate::graph::id::NodeId;
use crate::graph::template::{FieldDescriptor, NodeTemplate};
use crate::graph::typing::TypeRegistry;

/// Deployment-wide input handle layout policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HandleLayout {
    /// One top-center input handle aggregating every surviving field.
    #[default]
    Unified,
    /// One left-edge input handle per surviving field.
    PerField,
}

/// The role a port plays, with the data each role needs.
///
/// Resolved once at template-parse time; render code never re-inspects
/// the template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PortKind {
    /// A single field's input handle. `accepts` is the resolved concrete
    /// type set (empty accepts everything).
    GenericInput {
        accepts: Vec<String>,
        allows_multiple: bool,
        allows_loopback: bool,
    },
    /// The aggregate input handle of the unified layout policy.
    UnifiedInput {
        accepts: Vec<String>,
        allows_multiple: bool,
        allows_loopback: bool,
    },
    /// Primary output branch.
    SuccessOutput { produces: String },
    /// Alternate/error output branch.
    ElseOutput { produces: String },
}

impl PortKind {
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            PortKind::GenericInput { .. } | PortKind::UnifiedInput { .. }
        )
    }

    /// Resolved accepted set for inputs; empty for outputs.
    pub fn accepts(&self) -> &[String] {
        match self {
            PortKind::GenericInput { accepts, .. } | PortKind::UnifiedInput { accepts, .. } => {
                accepts
            }
            _ => &[],
        }
    }

    /// Produced type for outputs.
    pub fn produces(&self) -> Option<&str> {
        match self {
            PortKind::SuccessOutput { produces } | PortKind::ElseOutput { produces } => {
                Some(produces)
            }
            _ => None,
        }
    }

    pub fn allows_multiple(&self) -> bool {
        match self {
            PortKind::GenericInput {
                allows_multiple, ..
            }
            | PortKind::UnifiedInput {
                allows_multiple, ..
            } => *allows_multiple,
            _ => false,
        }
    }

    pub fn allows_loopback(&self) -> bool {
        match self {
            PortKind::GenericInput {
                allows_loopback, ..
            }
            | PortKind::UnifiedInput {
                allows_loopback, ..
            } => *allows_loopback,
            _ => false,
        }
    }

    /// Role half of the accessible handle label.
    pub fn role_label(&self) -> &'static str {
        match self {
            PortKind::GenericInput { .. } | PortKind::UnifiedInput { .. } => "Input",
            PortKind::SuccessOutput { .. } => "Success Output",
            PortKind::ElseOutput { .. } => "Else Output",
        }
    }
}

/// One connectable point on a node, fully resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortDescriptor {
    pub node: NodeId,
    /// Logical field name this handle represents.
    pub field: String,
    pub kind: PortKind,
}

impl PortDescriptor {
    pub fn key(&self) -> HandleKey {
        HandleKey::encode(self)
    }

    /// Type label shown while dragging from this port.
    pub fn type_label(&self) -> String {
        match &self.kind {
            PortKind::SuccessOutput { produces } | PortKind::ElseOutput { produces } => {
                produces.clone()
            }
            PortKind::GenericInput { accepts, .. } | PortKind::UnifiedInput { accepts, .. } => {
                match accepts.as_slice() {
                    [] => "Any".to_string(),
                    [single] => single.clone(),
                    many => many.join(" | "),
                }
            }
        }
    }
}

/// Serialized encoding of a full `PortDescriptor`.
///
/// Edges store handle keys rather than indices so that validity can be
/// recomputed without a side lookup into the node templates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HandleKey(String);

impl HandleKey {
    pub fn encode(descriptor: &PortDescriptor) -> Self {
        // PortDescriptor contains only strings and plain enums; JSON
        // serialization cannot fail for this shape.
        Self(serde_json::to_string(descriptor).expect("port descriptor serializes"))
    }

    pub fn decode(&self) -> Result<PortDescriptor, serde_json::Error> {
        serde_json::from_str(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Options influencing port resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct PortResolveOptions {
    pub layout: HandleLayout,
    pub tool_mode: bool,
}

/// Fields of a template that actually surface as handles, in render order.
///
/// Filter: internal (leading underscore), hidden, and advanced fields are
/// excluded; tool-mode-only fields are excluded unless tool mode is on.
/// Order: explicit `field_order` entries first, then template order, with
/// tool-mode fields always last.
pub fn visible_fields<'a>(template: &'a NodeTemplate, tool_mode: bool) -> Vec<&'a FieldDescriptor> {
    let order_index = |field: &FieldDescriptor| {
        template
            .field_order
            .iter()
            .position(|n| *n == field.name)
            .unwrap_or(usize::MAX)
    };

    let mut fields: Vec<(usize, &FieldDescriptor)> = template
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, f)| {
            !f.name.starts_with('_') && f.show && !f.advanced && (tool_mode || !f.tool_mode)
        })
        .collect();

    fields.sort_by_key(|(idx, f)| (f.tool_mode, order_index(f), *idx));
    fields.into_iter().map(|(_, f)| f).collect()
}

/// Resolve the full handle list for one node.
///
/// Inputs follow the configured layout policy; the source/sink registry
/// decides whether the node renders inputs and how many output branches
/// it gets (two Success/Else branches by default, one Success for pure
/// sources, none for sinks).
pub fn resolve_ports(
    node: NodeId,
    kind: ComponentKind,
    template: &NodeTemplate,
    registry: &TypeRegistry,
    opts: PortResolveOptions,
) -> Vec<PortDescriptor> {
    let mut ports = Vec::new();

    if !kind.is_pure_source() {
        let fields = visible_fields(template, opts.tool_mode);
        match opts.layout {
            HandleLayout::Unified => {
                ports.push(unified_input(node, &fields, registry));
            }
            HandleLayout::PerField => {
                for field in fields {
                    ports.push(PortDescriptor {
                        node,
                        field: field.name.clone(),
                        kind: PortKind::GenericInput {
                            accepts: registry.resolve_accepted(&field.input_types),
                            allows_multiple: field.allows_multiple,
                            allows_loopback: false,
                        },
                    });
                }
            }
        }
    }

    if !kind.is_pure_sink() {
        let produces = kind.output_type().to_string();
        ports.push(PortDescriptor {
            node,
            field: "success".to_string(),
            kind: PortKind::SuccessOutput {
                produces: produces.clone(),
            },
        });
        if !kind.is_pure_source() {
            ports.push(PortDescriptor {
                node,
                field: "else".to_string(),
                kind: PortKind::ElseOutput { produces },
            });
        }
    }

    ports
}

/// Build the single aggregate input handle of the unified policy.
///
/// The accepted set is the de-duplicated union of every surviving field.
/// A field with no type constraint makes the whole handle untyped, and an
/// empty template degrades the same way rather than failing the render.
/// The handle's field name defaults to the first surviving field.
fn unified_input(
    node: NodeId,
    fields: &[&FieldDescriptor],
    registry: &TypeRegistry,
) -> PortDescriptor {
    let untyped = fields.is_empty() || fields.iter().any(|f| f.input_types.is_empty());
    let accepts = if untyped {
        Vec::new()
    } else {
        let declared: Vec<String> = fields
            .iter()
            .flat_map(|f| f.input_types.iter().cloned())
            .collect();
        registry.resolve_accepted(&declared)
    };

    PortDescriptor {
        node,
        field: fields
            .first()
            .map(|f| f.name.clone())
            .unwrap_or_else(|| "input".to_string()),
        kind: PortKind::UnifiedInput {
            accepts,
            allows_multiple: fields.iter().any(|f| f.allows_multiple),
            allows_loopback: false,
        },
    }
}
