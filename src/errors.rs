use std::path::PathBuf;
use thiserror::Error;

use crate::exitcode;

#[derive(Error, Debug)]
pub enum ChartError {
    /// A tree invariant does not hold. The chart topology is fixed at
    /// compile time, so this is fatal and indicates a defect, not bad input.
    #[error("chart structure invariant violated: {0}")]
    Structure(String),

    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to launch graphviz program '{program}': {source}")]
    GraphvizLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The layout engine ran and failed; its stderr is surfaced unmodified.
    #[error("graphviz rendering failed: {message}")]
    GraphvizFailed {
        message: String,
        exit_code: Option<i32>,
    },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("cannot serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}

pub type ChartResult<T> = Result<T, ChartError>;

impl ChartError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ChartError::Structure(_) => exitcode::SOFTWARE,
            ChartError::Io { .. } => exitcode::IOERR,
            ChartError::GraphvizLaunch { .. } => exitcode::UNAVAILABLE,
            ChartError::GraphvizFailed { .. } => exitcode::SOFTWARE,
            ChartError::Config(_) => exitcode::CONFIG,
            ChartError::Serialize(_) => exitcode::CONFIG,
        }
    }
}
