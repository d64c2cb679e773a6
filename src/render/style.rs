//! Presentation side-table: colors, fonts and shapes keyed by node role
//! and edge tone. Styling is incidental metadata, not decision structure.

use crate::domain::{Answer, Mechanism, NodeKind};

/// Global graph appearance attributes.
#[derive(Debug, Clone)]
pub struct GraphStyle {
    pub rankdir: &'static str,
    pub bgcolor: &'static str,
    pub fontname: &'static str,
    pub pad: &'static str,
    pub nodesep: &'static str,
    pub ranksep: &'static str,
    pub title: &'static str,
    pub labelloc: &'static str,
    pub fontsize: &'static str,
    pub fontcolor: &'static str,
    pub dpi: u32,
}

/// Node appearance attributes. Optional fields are omitted from DOT
/// output (plaintext annotation nodes carry no fill or border).
#[derive(Debug, Clone)]
pub struct NodeStyle {
    pub shape: &'static str,
    pub style: Option<&'static str>,
    pub fillcolor: Option<&'static str>,
    pub color: Option<&'static str>,
    pub fontcolor: &'static str,
    pub fontname: &'static str,
    pub fontsize: &'static str,
    pub penwidth: Option<&'static str>,
}

/// Edge appearance attributes.
#[derive(Debug, Clone)]
pub struct EdgeStyle {
    pub color: &'static str,
    pub fontcolor: &'static str,
    pub fontname: &'static str,
    pub fontsize: &'static str,
    pub penwidth: &'static str,
}

// Mechanism border colors: SN2 blue, SN1 green, E2 dark red, E1 gold
const BLUE: &str = "#2563eb";
const GREEN: &str = "#16a34a";
const DARK_RED: &str = "#b91c1c";
const GOLD: &str = "#ca8a04";
const SLATE: &str = "#334155";

/// The full appearance table for one rendering of the chart.
#[derive(Debug, Clone)]
pub struct Theme {
    pub graph: GraphStyle,
    start: NodeStyle,
    question: NodeStyle,
    note: NodeStyle,
    sn2: NodeStyle,
    sn1: NodeStyle,
    e2: NodeStyle,
    e1: NodeStyle,
    edge_neutral: EdgeStyle,
    edge_yes: EdgeStyle,
    edge_no: EdgeStyle,
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

impl Theme {
    /// The chart's original appearance.
    pub fn classic() -> Self {
        let outcome = |accent: &'static str, fill: &'static str| NodeStyle {
            shape: "box",
            style: Some("rounded,filled,bold"),
            fillcolor: Some(fill),
            color: Some(accent),
            fontcolor: accent,
            fontname: "Helvetica Neue Bold",
            fontsize: "14",
            penwidth: Some("3"),
        };

        Self {
            graph: GraphStyle {
                rankdir: "TB",
                bgcolor: "white",
                fontname: "Helvetica Neue",
                pad: "0.8",
                nodesep: "0.6",
                ranksep: "0.7",
                title: "Substitution & Elimination \u{2014} Decision Flowchart\n\n",
                labelloc: "t",
                fontsize: "22",
                fontcolor: "#1a1a1a",
                dpi: 200,
            },
            start: NodeStyle {
                shape: "box",
                style: Some("rounded,filled,bold"),
                fillcolor: Some("#f1f5f9"),
                color: Some(SLATE),
                fontcolor: SLATE,
                fontname: "Helvetica Neue Bold",
                fontsize: "14",
                penwidth: Some("2.5"),
            },
            question: NodeStyle {
                shape: "diamond",
                style: Some("filled"),
                fillcolor: Some("#f8f9fa"),
                color: Some("#6b7280"),
                fontcolor: "#374151",
                fontname: "Helvetica Neue Bold",
                fontsize: "11",
                penwidth: Some("2"),
            },
            note: NodeStyle {
                shape: "plaintext",
                style: None,
                fillcolor: None,
                color: None,
                fontcolor: "#9ca3af",
                fontname: "Helvetica Neue",
                fontsize: "9",
                penwidth: None,
            },
            sn2: outcome(BLUE, "#eff6ff"),
            sn1: outcome(GREEN, "#f0fdf4"),
            e2: outcome(DARK_RED, "#fef2f2"),
            e1: outcome(GOLD, "#fefce8"),
            edge_neutral: EdgeStyle {
                color: "#94a3b8",
                fontcolor: "#64748b",
                fontname: "Helvetica Neue Bold",
                fontsize: "10",
                penwidth: "1.8",
            },
            edge_yes: EdgeStyle {
                color: GREEN,
                fontcolor: GREEN,
                fontname: "Helvetica Neue Bold",
                fontsize: "10",
                penwidth: "1.8",
            },
            edge_no: EdgeStyle {
                color: "#dc2626",
                fontcolor: "#dc2626",
                fontname: "Helvetica Neue Bold",
                fontsize: "10",
                penwidth: "1.8",
            },
        }
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.graph.dpi = dpi;
        self
    }

    /// Style for a tree node. The root keeps its own preset; other
    /// decision nodes share the diamond question preset.
    pub fn node_style(&self, kind: &NodeKind, is_root: bool) -> &NodeStyle {
        match kind {
            NodeKind::Decision(_) if is_root => &self.start,
            NodeKind::Decision(_) => &self.question,
            NodeKind::Outcome(Mechanism::Sn2) => &self.sn2,
            NodeKind::Outcome(Mechanism::Sn1) => &self.sn1,
            NodeKind::Outcome(Mechanism::E2) => &self.e2,
            NodeKind::Outcome(Mechanism::E1) => &self.e1,
        }
    }

    pub fn note_style(&self) -> &NodeStyle {
        &self.note
    }

    pub fn edge_style(&self, answer: &Answer) -> &EdgeStyle {
        match answer {
            Answer::Degree(_) => &self.edge_neutral,
            Answer::Yes => &self.edge_yes,
            Answer::No => &self.edge_no,
        }
    }
}
