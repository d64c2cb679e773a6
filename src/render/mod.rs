//! Rendering layer: style side-table, DOT serialization and delegation
//! to the external Graphviz engine.

pub mod dot;
pub mod graphviz;
pub mod style;

pub use dot::to_dot;
pub use graphviz::{CommandRunner, GraphvizRenderer, OutputFormat, RealCommandRunner};
pub use style::Theme;
