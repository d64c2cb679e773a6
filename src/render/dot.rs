//! DOT serialization of the chart
//!
//! Produces the abstract graph description handed to the layout engine:
//! global attributes, one statement per node with attributes from the
//! style side-table, one labeled statement per edge, and the annotation
//! nodes with their invisible anchor edges. Output is deterministic for
//! a given chart and theme.

use std::fmt::Write;

use crate::domain::{Answer, Flowchart};
use crate::render::style::{EdgeStyle, NodeStyle, Theme};

/// Graph name in the DOT source.
const GRAPH_NAME: &str = "SN_E_Flowchart";

/// Escape a label for a double-quoted DOT string.
fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

/// Edge labels carry the original diagram's spacing padding.
fn edge_label(answer: &Answer) -> String {
    match answer {
        Answer::Degree(d) => format!("  {}  ", d),
        Answer::Yes => " YES ".to_string(),
        Answer::No => " NO ".to_string(),
    }
}

fn push_node_attrs(out: &mut String, label: &str, style: &NodeStyle) {
    let _ = write!(out, "label=\"{}\", shape={}", escape(label), style.shape);
    if let Some(s) = style.style {
        let _ = write!(out, ", style=\"{}\"", s);
    }
    if let Some(fill) = style.fillcolor {
        let _ = write!(out, ", fillcolor=\"{}\"", fill);
    }
    if let Some(color) = style.color {
        let _ = write!(out, ", color=\"{}\"", color);
    }
    let _ = write!(
        out,
        ", fontcolor=\"{}\", fontname=\"{}\", fontsize=\"{}\"",
        style.fontcolor, style.fontname, style.fontsize
    );
    if let Some(penwidth) = style.penwidth {
        let _ = write!(out, ", penwidth=\"{}\"", penwidth);
    }
}

fn push_edge_attrs(out: &mut String, label: &str, style: &EdgeStyle) {
    let _ = write!(
        out,
        "label=\"{}\", color=\"{}\", fontcolor=\"{}\", fontname=\"{}\", fontsize=\"{}\", penwidth=\"{}\"",
        escape(label),
        style.color,
        style.fontcolor,
        style.fontname,
        style.fontsize,
        style.penwidth
    );
}

/// Serialize the chart to DOT source.
pub fn to_dot(flowchart: &Flowchart, theme: &Theme) -> String {
    let chart = &flowchart.chart;
    let graph = &theme.graph;
    let mut out = String::new();

    let _ = writeln!(out, "digraph {} {{", GRAPH_NAME);
    let _ = writeln!(
        out,
        "    graph [rankdir={}, bgcolor=\"{}\", fontname=\"{}\", pad=\"{}\", nodesep=\"{}\", ranksep=\"{}\", label=\"{}\", labelloc=\"{}\", fontsize=\"{}\", fontcolor=\"{}\", dpi=\"{}\"];",
        graph.rankdir,
        graph.bgcolor,
        graph.fontname,
        graph.pad,
        graph.nodesep,
        graph.ranksep,
        escape(graph.title),
        graph.labelloc,
        graph.fontsize,
        graph.fontcolor,
        graph.dpi
    );
    let _ = writeln!(out);

    let root = chart.root();
    for (idx, node) in chart.iter() {
        let style = theme.node_style(&node.kind, Some(idx) == root);
        let _ = write!(out, "    \"{}\" [", node.key);
        push_node_attrs(&mut out, node.kind.label(), style);
        let _ = writeln!(out, "];");
    }

    let _ = writeln!(out);
    for (_, node) in chart.iter() {
        for &(answer, child_idx) in &node.children {
            if let Some(child) = chart.node(child_idx) {
                let _ = write!(out, "    \"{}\" -> \"{}\" [", node.key, child.key);
                push_edge_attrs(&mut out, &edge_label(&answer), theme.edge_style(&answer));
                let _ = writeln!(out, "];");
            }
        }
    }

    if !flowchart.annotations.is_empty() {
        let _ = writeln!(out);
        for (i, annotation) in flowchart.annotations.iter().enumerate() {
            let key = format!("note_{}", i);
            let _ = write!(out, "    \"{}\" [", key);
            push_node_attrs(&mut out, &annotation.text, theme.note_style());
            let _ = writeln!(out, "];");
            let _ = writeln!(
                out,
                "    \"{}\" -> \"{}\" [style=\"invis\"];",
                annotation.anchor_key, key
            );
        }
    }

    let _ = writeln!(out, "}}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChartBuilder, Degree};

    #[test]
    fn test_escape_handles_quotes_and_newlines() {
        assert_eq!(escape("Bulky\nbase?"), "Bulky\\nbase?");
        assert_eq!(escape(r#"say "hi""#), r#"say \"hi\""#);
    }

    #[test]
    fn test_edge_labels_keep_diagram_padding() {
        assert_eq!(edge_label(&Answer::Degree(Degree::Methyl)), "  0\u{b0}  ");
        assert_eq!(edge_label(&Answer::Yes), " YES ");
        assert_eq!(edge_label(&Answer::No), " NO ");
    }

    #[test]
    fn test_dot_is_well_formed() {
        let flowchart = ChartBuilder::new().build().unwrap();
        let dot = to_dot(&flowchart, &Theme::classic());
        assert!(dot.starts_with("digraph SN_E_Flowchart {"));
        assert!(dot.trim_end().ends_with('}'));
        // one statement per node, one per edge, plus the annotation pair
        assert_eq!(dot.matches(" -> ").count(), 16 + 1);
    }
}
