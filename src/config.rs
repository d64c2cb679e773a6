//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults (reproduce the original diagram artifacts exactly)
//! 2. Global config: `$XDG_CONFIG_HOME/snechart/snechart.toml`
//! 3. Environment variables: `SNECHART_*` prefix (`__` as section separator)
//!
//! The no-argument invocation needs none of this; defaults are complete.

use std::path::PathBuf;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::errors::ChartResult;
use crate::render::OutputFormat;

/// Output artifact configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory the image files are written to
    pub directory: PathBuf,
    /// Basename shared by all output files
    pub basename: String,
    /// Formats rendered per invocation, in order
    pub formats: Vec<OutputFormat>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            basename: "sn_e_flowchart".to_string(),
            formats: vec![OutputFormat::Png, OutputFormat::Pdf],
        }
    }
}

/// Layout engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GraphvizSettings {
    /// Engine program name or path
    pub program: String,
    /// Raster resolution passed as a graph attribute
    pub dpi: u32,
}

impl Default for GraphvizSettings {
    fn default() -> Self {
        Self {
            program: "dot".to_string(),
            dpi: 200,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    pub output: OutputSettings,
    pub graphviz: GraphvizSettings,
}

impl Settings {
    /// Load settings with layered precedence.
    pub fn load() -> ChartResult<Self> {
        let mut builder = Config::builder().add_source(Config::try_from(&Settings::default())?);

        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                builder = builder.add_source(File::from(path));
            }
        }

        let settings = builder
            .add_source(Environment::with_prefix("SNECHART").separator("__"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    /// Location of the global config file, if a home directory exists.
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "snechart").map(|dirs| dirs.config_dir().join("snechart.toml"))
    }

    /// Full path of the artifact for one output format.
    pub fn output_path(&self, format: OutputFormat) -> PathBuf {
        self.output
            .directory
            .join(format!("{}.{}", self.output.basename, format.extension()))
    }
}
