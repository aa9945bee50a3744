//! Component kind catalog.
//!
//! This module defines the processing components that can be placed on the
//! canvas, and is the single registry answering which kinds are pure
//! sources (no input handles) or pure sinks (no output handles).

use serde::{Deserialize, Serialize};

/// Kinds of workflow components that can be instantiated on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentKind {
    // Pure sources (triggers / entry points)
    /// Manual trigger fired by the user to start a run.
    ManualTrigger,
    /// Cron trigger fired on a schedule.
    CronTrigger,
    /// Webhook trigger fired by an incoming HTTP call.
    WebhookTrigger,
    /// Chat input that injects a user message into the flow.
    ChatInput,

    // Transforms
    /// Prompt template that renders variables into a message.
    Prompt,
    /// Language model invocation.
    LanguageModel,
    /// Parser that extracts text from structured payloads.
    Parser,
    /// Cleaner that normalizes tabular data.
    DataCleaner,

    // Sinks
    /// Chat output that displays the final message.
    ChatOutput,
    /// File writer that persists payloads to disk.
    FileWriter,
}

impl ComponentKind {
    /// Get the display name for this component kind.
    pub fn display_name(&self) -> &'static str {
        match self {
            ComponentKind::ManualTrigger => "Manual Trigger",
            ComponentKind::CronTrigger => "Cron Trigger",
            ComponentKind::WebhookTrigger => "Webhook Trigger",
            ComponentKind::ChatInput => "Chat Input",
            ComponentKind::Prompt => "Prompt",
            ComponentKind::LanguageModel => "Language Model",
            ComponentKind::Parser => "Parser",
            ComponentKind::DataCleaner => "Data Cleaner",
            ComponentKind::ChatOutput => "Chat Output",
            ComponentKind::FileWriter => "File Writer",
        }
    }

    /// Get all available component kinds, palette order.
    pub fn all() -> &'static [ComponentKind] {
        &[
            ComponentKind::ManualTrigger,
            ComponentKind::CronTrigger,
            ComponentKind::WebhookTrigger,
            ComponentKind::ChatInput,
            ComponentKind::Prompt,
            ComponentKind::LanguageModel,
            ComponentKind::Parser,
            ComponentKind::DataCleaner,
            ComponentKind::ChatOutput,
            ComponentKind::FileWriter,
        ]
    }

    /// Whether this kind is a pure source: it renders zero input handles
    /// and a single "Success" output with no "Else" branch.
    pub fn is_pure_source(&self) -> bool {
        matches!(
            self,
            ComponentKind::ManualTrigger
                | ComponentKind::CronTrigger
                | ComponentKind::WebhookTrigger
                | ComponentKind::ChatInput
        )
    }

    /// Whether this kind is a pure sink: it renders zero output handles.
    pub fn is_pure_sink(&self) -> bool {
        matches!(self, ComponentKind::ChatOutput | ComponentKind::FileWriter)
    }

    /// The primary type produced on this kind's output handles.
    pub fn output_type(&self) -> &'static str {
        match self {
            ComponentKind::ManualTrigger
            | ComponentKind::CronTrigger
            | ComponentKind::WebhookTrigger => "Trigger",
            ComponentKind::ChatInput => "Message",
            ComponentKind::Prompt => "Message",
            ComponentKind::LanguageModel => "Message",
            ComponentKind::Parser => "Text",
            ComponentKind::DataCleaner => "DataFrame",
            // Sinks produce nothing; the label is unused but kept total.
            ComponentKind::ChatOutput | ComponentKind::FileWriter => "Message",
        }
    }

    /// Get a detailed description of what this component does.
    pub fn description(&self) -> &'static str {
        match self {
            ComponentKind::ManualTrigger =>
                "Starts the workflow on demand.\n\
                 Fires a trigger signal when the user runs the flow.",

            ComponentKind::CronTrigger =>
                "Starts the workflow on a schedule.\n\
                 Fires a trigger signal on each cron match.",

            ComponentKind::WebhookTrigger =>
                "Starts the workflow from an HTTP call.\n\
                 Fires a trigger carrying the request payload.",

            ComponentKind::ChatInput =>
                "Injects a user message into the flow.\n\
                 Entry point for conversational workflows.",

            ComponentKind::Prompt =>
                "Renders a prompt template.\n\
                 Fills variables from upstream messages and text.",

            ComponentKind::LanguageModel =>
                "Invokes a language model.\n\
                 Sends the incoming message and emits the completion.",

            ComponentKind::Parser =>
                "Extracts text from structured payloads.\n\
                 Accepts data or dataframes and emits plain text.",

            ComponentKind::DataCleaner =>
                "Normalizes tabular data.\n\
                 Trims, deduplicates and re-types columns.",

            ComponentKind::ChatOutput =>
                "Displays the final message to the user.\n\
                 Terminal node of conversational workflows.",

            ComponentKind::FileWriter =>
                "Writes payloads to disk.\n\
                 Terminal node for export-style workflows.",
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
