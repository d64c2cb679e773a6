//! Construction of the fixed substitution/elimination chart
//!
//! The whole classification procedure is hand-authored here: one four-way
//! root question and six boolean follow-ups, ending in ten terminal nodes.
//! Terminals reachable via different paths are deliberately separate nodes
//! so the rendered diagram shows one box per path, as the chart is drawn.

use tracing::{debug, instrument};

use crate::domain::arena::{DecisionChart, NodeKind};
use crate::domain::{Answer, Degree, Mechanism, Question};
use crate::errors::ChartResult;

/// Presentation footnote attached below a node, keyed by node identity.
/// Not part of the decision structure; rendered as a plaintext node with
/// an invisible anchor edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub anchor_key: String,
    pub text: String,
}

/// The complete chart: decision structure plus presentation annotations.
#[derive(Debug)]
pub struct Flowchart {
    pub chart: DecisionChart,
    pub annotations: Vec<Annotation>,
}

/// Builds the substitution/elimination decision chart.
pub struct ChartBuilder;

impl Default for ChartBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ChartBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Construct and validate the chart.
    ///
    /// Validation failure here means the hand-authored topology below is
    /// wrong, which is fatal and not recoverable at runtime.
    #[instrument(level = "debug", skip(self))]
    pub fn build(&self) -> ChartResult<Flowchart> {
        use Answer::{No, Yes};
        use Mechanism::{Sn1, Sn2, E1, E2};
        use NodeKind::{Decision, Outcome};

        let mut chart = DecisionChart::new();

        let degree = chart.insert_node("degree", Decision(Question::SubstrateDegree), None);

        // 0 degrees: backside attack is unhindered, no competing question
        chart.insert_node(
            "sn2_methyl",
            Outcome(Sn2),
            Some((degree, Answer::Degree(Degree::Methyl))),
        );

        // 1 degree: only a bulky base tips the balance to elimination
        let bulky = chart.insert_node(
            "bulky",
            Decision(Question::BulkyBase),
            Some((degree, Answer::Degree(Degree::Primary))),
        );
        chart.insert_node("e2_bulky", Outcome(E2), Some((bulky, Yes)));
        chart.insert_node("sn2_primary", Outcome(Sn2), Some((bulky, No)));

        // 2 degrees: charged nucleophiles react bimolecularly, neutral ones
        // ionize first and the heat question splits E1 from SN1
        let charge = chart.insert_node(
            "charge",
            Decision(Question::ChargedNucleophile),
            Some((degree, Answer::Degree(Degree::Secondary))),
        );
        let strong_charged = chart.insert_node(
            "strong_charged",
            Decision(Question::StrongBase),
            Some((charge, Yes)),
        );
        chart.insert_node("e2_charged", Outcome(E2), Some((strong_charged, Yes)));
        chart.insert_node("sn2_charged", Outcome(Sn2), Some((strong_charged, No)));
        let heat_neutral = chart.insert_node(
            "heat_neutral",
            Decision(Question::HeatApplied),
            Some((charge, No)),
        );
        chart.insert_node("e1_neutral", Outcome(E1), Some((heat_neutral, Yes)));
        chart.insert_node("sn1_neutral", Outcome(Sn1), Some((heat_neutral, No)));

        // 3 degrees: strong bases eliminate outright, otherwise heat decides
        let strong_tertiary = chart.insert_node(
            "strong_tertiary",
            Decision(Question::StrongBase),
            Some((degree, Answer::Degree(Degree::Tertiary))),
        );
        chart.insert_node("e2_tertiary", Outcome(E2), Some((strong_tertiary, Yes)));
        let heat_tertiary = chart.insert_node(
            "heat_tertiary",
            Decision(Question::HeatApplied),
            Some((strong_tertiary, No)),
        );
        chart.insert_node("e1_tertiary", Outcome(E1), Some((heat_tertiary, Yes)));
        chart.insert_node("sn1_tertiary", Outcome(Sn1), Some((heat_tertiary, No)));

        chart.validate()?;
        debug!(
            nodes = chart.node_count(),
            edges = chart.edge_count(),
            "chart built"
        );

        let annotations = vec![Annotation {
            anchor_key: "sn2_primary".to_string(),
            text: "(most of the time)".to_string(),
        }];

        Ok(Flowchart { chart, annotations })
    }
}
