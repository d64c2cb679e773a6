//! Domain layer: the decision chart and its traversal semantics
//!
//! This layer is independent of external concerns (no I/O, no CLI, no
//! config loading, no rendering).

pub mod arena;
pub mod builder;
pub mod mechanism;
pub mod question;

pub use arena::{ChartNode, DecisionChart, NodeKind};
pub use builder::{Annotation, ChartBuilder, Flowchart};
pub use mechanism::{Mechanism, Molecularity, Pathway};
pub use question::{Answer, Conditions, Degree, Question};
