//! Integration tests for node handle layout policies
//!
//! Covers the source/sink registry rules and both deployment layout
//! policies over the public API.

mod common;

use common::builders::GraphBuilder;
use flowcanvas_rs::graph::ports::{resolve_ports, PortResolveOptions};
use flowcanvas_rs::{ComponentKind, HandleLayout, PortKind, TypeRegistry};

fn resolve(kind: ComponentKind, layout: HandleLayout, tool_mode: bool) -> Vec<PortKind> {
    let mut builder = GraphBuilder::new();
    let id = builder.add(kind);
    let graph = builder.build();
    let node = graph.node(id).unwrap();
    resolve_ports(
        id,
        node.kind,
        &node.template,
        &TypeRegistry::new(),
        PortResolveOptions { layout, tool_mode },
    )
    .into_iter()
    .map(|p| p.kind)
    .collect()
}

#[test]
fn test_manual_trigger_is_pure_source() {
    // A pure source renders zero input handles and exactly one Success
    // output, with no Else branch.
    for layout in [HandleLayout::Unified, HandleLayout::PerField] {
        let kinds = resolve(ComponentKind::ManualTrigger, layout, false);
        assert_eq!(kinds.len(), 1);
        assert!(matches!(kinds[0], PortKind::SuccessOutput { .. }));
    }
}

#[test]
fn test_every_pure_source_has_no_inputs() {
    for kind in ComponentKind::all().iter().filter(|k| k.is_pure_source()) {
        let kinds = resolve(*kind, HandleLayout::PerField, true);
        assert!(
            kinds.iter().all(|k| !k.is_input()),
            "{kind} rendered an input handle"
        );
    }
}

#[test]
fn test_sinks_have_no_outputs() {
    for kind in ComponentKind::all().iter().filter(|k| k.is_pure_sink()) {
        let kinds = resolve(*kind, HandleLayout::Unified, false);
        assert!(
            kinds.iter().all(|k| k.is_input()),
            "{kind} rendered an output handle"
        );
    }
}

#[test]
fn test_default_nodes_get_success_and_else_pair() {
    let kinds = resolve(ComponentKind::Prompt, HandleLayout::Unified, false);
    let outputs: Vec<_> = kinds.iter().filter(|k| !k.is_input()).collect();
    assert_eq!(outputs.len(), 2);
    assert!(matches!(outputs[0], PortKind::SuccessOutput { .. }));
    assert!(matches!(outputs[1], PortKind::ElseOutput { .. }));
}

#[test]
fn test_unified_layout_collapses_inputs_to_one_handle() {
    let kinds = resolve(ComponentKind::LanguageModel, HandleLayout::Unified, false);
    let inputs: Vec<_> = kinds.iter().filter(|k| k.is_input()).collect();
    assert_eq!(inputs.len(), 1);
    assert!(matches!(inputs[0], PortKind::UnifiedInput { .. }));
}

#[test]
fn test_per_field_layout_exposes_each_field() {
    let kinds = resolve(ComponentKind::LanguageModel, HandleLayout::PerField, false);
    let inputs: Vec<_> = kinds.iter().filter(|k| k.is_input()).collect();
    assert_eq!(inputs.len(), 2);
    assert!(inputs
        .iter()
        .all(|k| matches!(k, PortKind::GenericInput { .. })));
}

#[test]
fn test_tool_mode_adds_tool_fields() {
    let without = resolve(ComponentKind::LanguageModel, HandleLayout::PerField, false);
    let with = resolve(ComponentKind::LanguageModel, HandleLayout::PerField, true);
    let count = |kinds: &[PortKind]| kinds.iter().filter(|k| k.is_input()).count();
    assert_eq!(count(&with), count(&without) + 1);
}
