//! Delegation to the external Graphviz layout engine
//!
//! The engine owns layout, font rendering and file encoding; this module
//! only pipes DOT source to its stdin and surfaces failures unmodified.
//! The `CommandRunner` seam allows renderer tests without Graphviz.

use std::io;
use std::path::Path;
use std::process::Output;

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::errors::{ChartError, ChartResult};

/// Output file formats: one raster, one vector-capable document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Pdf,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Pdf => "pdf",
        }
    }

    /// The engine's `-T` renderer argument.
    pub fn dot_arg(&self) -> String {
        format!("-T{}", self.extension())
    }
}

/// External command runner abstraction.
pub trait CommandRunner: Send + Sync {
    /// Run a command with arguments.
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output>;

    /// Run a command with arguments, feeding `stdin` to the child.
    fn run_with_stdin(&self, cmd: &str, args: &[&str], stdin: &str) -> io::Result<Output>;
}

/// Real command runner implementation.
#[derive(Debug, Default)]
pub struct RealCommandRunner;

impl CommandRunner for RealCommandRunner {
    fn run(&self, cmd: &str, args: &[&str]) -> io::Result<Output> {
        std::process::Command::new(cmd).args(args).output()
    }

    fn run_with_stdin(&self, cmd: &str, args: &[&str], stdin: &str) -> io::Result<Output> {
        use std::io::Write;
        use std::process::Stdio;

        let mut child = std::process::Command::new(cmd)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        if let Some(mut child_stdin) = child.stdin.take() {
            child_stdin.write_all(stdin.as_bytes())?;
        }

        child.wait_with_output()
    }
}

/// Renders DOT source to image files via the configured engine program.
pub struct GraphvizRenderer {
    program: String,
    runner: Box<dyn CommandRunner>,
}

impl GraphvizRenderer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            runner: Box::new(RealCommandRunner),
        }
    }

    /// Replace the command runner (used by tests).
    pub fn with_runner(program: impl Into<String>, runner: Box<dyn CommandRunner>) -> Self {
        Self {
            program: program.into(),
            runner,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Render `dot_source` to `path` in the given format.
    ///
    /// Engine failure is fatal for the invocation; a partially written
    /// output file is not considered valid.
    #[instrument(level = "debug", skip(self, dot_source))]
    pub fn render_to_file(
        &self,
        dot_source: &str,
        format: OutputFormat,
        path: &Path,
    ) -> ChartResult<()> {
        let target = path.display().to_string();
        let type_arg = format.dot_arg();
        let args = [type_arg.as_str(), "-o", target.as_str()];
        debug!(program = %self.program, ?args, "invoking layout engine");

        let output = self
            .runner
            .run_with_stdin(&self.program, &args, dot_source)
            .map_err(|source| ChartError::GraphvizLaunch {
                program: self.program.clone(),
                source,
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(ChartError::GraphvizFailed {
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                exit_code: output.status.code(),
            })
        }
    }

    /// Probe the installed engine version (`dot -V` reports on stderr).
    /// Returns None when the engine runs but the banner is unrecognized.
    #[instrument(level = "debug", skip(self))]
    pub fn version(&self) -> ChartResult<Option<String>> {
        let output =
            self.runner
                .run(&self.program, &["-V"])
                .map_err(|source| ChartError::GraphvizLaunch {
                    program: self.program.clone(),
                    source,
                })?;

        if !output.status.success() {
            return Err(ChartError::GraphvizFailed {
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                exit_code: output.status.code(),
            });
        }

        let banner = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stderr),
            String::from_utf8_lossy(&output.stdout)
        );
        let re = Regex::new(r"graphviz version (\S+)").unwrap();
        Ok(re.captures(&banner).map(|caps| caps[1].to_string()))
    }
}
