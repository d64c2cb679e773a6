//! Tests for DOT serialization

use snechart::domain::ChartBuilder;
use snechart::render::{to_dot, Theme};

fn dot() -> String {
    let flowchart = ChartBuilder::new().build().expect("fixed chart must build");
    to_dot(&flowchart, &Theme::classic())
}

// ============================================================
// Structure
// ============================================================

#[test]
fn given_chart_when_serializing_then_every_node_has_a_statement() {
    let dot = dot();
    for key in [
        "degree",
        "sn2_methyl",
        "bulky",
        "e2_bulky",
        "sn2_primary",
        "charge",
        "strong_charged",
        "e2_charged",
        "sn2_charged",
        "heat_neutral",
        "e1_neutral",
        "sn1_neutral",
        "strong_tertiary",
        "e2_tertiary",
        "heat_tertiary",
        "e1_tertiary",
        "sn1_tertiary",
    ] {
        assert!(
            dot.contains(&format!("\"{}\" [", key)),
            "missing node statement for '{}'",
            key
        );
    }
}

#[test]
fn given_chart_when_serializing_then_edges_carry_outcome_labels() {
    let dot = dot();
    assert!(dot.contains("\"degree\" -> \"sn2_methyl\""));
    assert!(dot.contains("label=\"  0\u{b0}  \""));
    assert!(dot.contains("label=\"  3\u{b0}  \""));
    assert!(dot.contains("label=\" YES \""));
    assert!(dot.contains("label=\" NO \""));
    assert!(dot.contains("\"bulky\" -> \"e2_bulky\""));
    assert!(dot.contains("\"heat_tertiary\" -> \"sn1_tertiary\""));
}

#[test]
fn given_chart_when_serializing_then_multiline_prompts_are_escaped() {
    let dot = dot();
    assert!(dot.contains("label=\"Bulky\\nbase?\""));
    assert!(dot.contains("label=\"Nu\u{207b} has\\ncharge?\""));
    // no raw newline inside a label
    assert!(!dot.contains("label=\"Bulky\n"));
}

// ============================================================
// Appearance
// ============================================================

#[test]
fn given_classic_theme_then_global_attributes_are_emitted() {
    let dot = dot();
    assert!(dot.starts_with("digraph SN_E_Flowchart {"));
    assert!(dot.contains("rankdir=TB"));
    assert!(dot.contains("dpi=\"200\""));
    assert!(dot.contains("Substitution & Elimination"));
    assert!(dot.contains("labelloc=\"t\""));
}

#[test]
fn given_classic_theme_then_mechanism_accents_differ() {
    let dot = dot();
    assert!(dot.contains("#2563eb")); // SN2 blue
    assert!(dot.contains("#16a34a")); // SN1 green, YES edges
    assert!(dot.contains("#b91c1c")); // E2 dark red
    assert!(dot.contains("#ca8a04")); // E1 gold
}

#[test]
fn given_annotation_then_plaintext_node_and_invisible_edge_are_emitted() {
    let dot = dot();
    assert!(dot.contains("\"note_0\" ["));
    assert!(dot.contains("(most of the time)"));
    assert!(dot.contains("\"sn2_primary\" -> \"note_0\" [style=\"invis\"];"));
}

#[test]
fn given_dpi_override_then_graph_attribute_follows() {
    let flowchart = ChartBuilder::new().build().unwrap();
    let dot = to_dot(&flowchart, &Theme::classic().with_dpi(300));
    assert!(dot.contains("dpi=\"300\""));
}

// ============================================================
// Determinism
// ============================================================

#[test]
fn given_two_runs_then_output_is_byte_identical() {
    assert_eq!(dot(), dot());
}
