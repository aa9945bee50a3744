//! Node templates — the ordered field declarations each component carries.
//!
//! A template is what the port aggregation reads to decide which handles a
//! node renders. Fields follow the conventions of the component registry:
//! leading-underscore names are internal, `show`/`advanced` gate rendering,
//! and `tool_mode` fields only surface when tool mode is enabled.

use crate::graph::component::ComponentKind;

/// Declaration of one template field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field key. Leading underscore marks an internal field.
    pub name: String,
    /// Human-readable label shown next to the handle.
    pub display_name: String,
    /// Declared accepted types; entries may name a type family.
    /// Empty means the field accepts everything.
    pub input_types: Vec<String>,
    /// Whether the field is rendered at all.
    pub show: bool,
    /// Advanced fields are hidden from the canvas.
    pub advanced: bool,
    /// Tool-mode-only fields surface only when tool mode is enabled.
    pub tool_mode: bool,
    /// List fields accept multiple incoming connections.
    pub allows_multiple: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            input_types: Vec::new(),
            show: true,
            advanced: false,
            tool_mode: false,
            allows_multiple: false,
        }
    }

    pub fn types(mut self, types: &[&str]) -> Self {
        self.input_types = types.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.show = false;
        self
    }

    pub fn advanced(mut self) -> Self {
        self.advanced = true;
        self
    }

    pub fn tool_mode(mut self) -> Self {
        self.tool_mode = true;
        self
    }

    pub fn multi(mut self) -> Self {
        self.allows_multiple = true;
        self
    }
}

/// Ordered field declarations for one node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeTemplate {
    fields: Vec<FieldDescriptor>,
    /// Explicit ordering hints; fields listed here sort before the rest.
    pub field_order: Vec<String>,
}

impl NodeTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_field_order(mut self, order: &[&str]) -> Self {
        self.field_order = order.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Build the stock template for a component kind.
pub fn template_for(kind: ComponentKind) -> NodeTemplate {
    match kind {
        ComponentKind::ManualTrigger => NodeTemplate::new()
            .with_field(FieldDescriptor::new("_trigger_id", "Trigger Id").hidden()),
        ComponentKind::CronTrigger => NodeTemplate::new()
            .with_field(FieldDescriptor::new("schedule", "Schedule").types(&["Text"]))
            .with_field(
                FieldDescriptor::new("timezone", "Timezone")
                    .types(&["Text"])
                    .advanced(),
            ),
        ComponentKind::WebhookTrigger => NodeTemplate::new()
            .with_field(FieldDescriptor::new("path", "Path").types(&["Text"]))
            .with_field(FieldDescriptor::new("_secret", "Secret").hidden()),
        ComponentKind::ChatInput => NodeTemplate::new()
            .with_field(FieldDescriptor::new("input_value", "Input").types(&["Text"]))
            .with_field(FieldDescriptor::new("_session_id", "Session Id").hidden()),
        ComponentKind::Prompt => NodeTemplate::new()
            .with_field(FieldDescriptor::new("template", "Template").types(&["Text"]))
            .with_field(
                FieldDescriptor::new("variables", "Variables")
                    .types(&["Message", "Text"])
                    .multi(),
            )
            .with_field_order(&["template", "variables"]),
        ComponentKind::LanguageModel => NodeTemplate::new()
            .with_field(FieldDescriptor::new("input", "Input").types(&["Message"]))
            .with_field(
                FieldDescriptor::new("system_message", "System Message")
                    .types(&["Message", "Text"]),
            )
            .with_field(
                FieldDescriptor::new("temperature", "Temperature")
                    .types(&["Number"])
                    .advanced(),
            )
            .with_field(
                FieldDescriptor::new("tools", "Tools")
                    .types(&["Tool"])
                    .tool_mode()
                    .multi(),
            )
            .with_field_order(&["input", "system_message"]),
        ComponentKind::Parser => NodeTemplate::new().with_field(
            FieldDescriptor::new("data", "Data")
                .types(&["Tabular", "Message"])
                .multi(),
        ),
        ComponentKind::DataCleaner => NodeTemplate::new()
            .with_field(FieldDescriptor::new("data", "Data").types(&["Tabular"]))
            .with_field(
                FieldDescriptor::new("columns", "Columns")
                    .types(&["Text"])
                    .advanced(),
            ),
        ComponentKind::ChatOutput => NodeTemplate::new()
            .with_field(FieldDescriptor::new("message", "Message").types(&["Message", "Text"])),
        ComponentKind::FileWriter => NodeTemplate::new()
            .with_field(FieldDescriptor::new("content", "Content").types(&["Data", "Text"]))
            .with_field(FieldDescriptor::new("path", "Path").types(&["Text"])),
    }
}
