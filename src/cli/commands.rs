//! Command execution: dispatch from parsed arguments to operations

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::config::Settings;
use crate::domain::ChartBuilder;
use crate::errors::ChartResult;
use crate::render::{GraphvizRenderer, OutputFormat};
use crate::{flowchart_dot, render_flowchart};

pub fn execute_command(cli: &Cli) -> ChartResult<()> {
    match &cli.command {
        Some(Commands::Render {
            out_dir,
            format,
            basename,
        }) => _render(out_dir.as_deref(), format, basename.as_deref()),
        Some(Commands::Dot) => _dot(),
        Some(Commands::Tree) => _tree(),
        Some(Commands::Paths) => _paths(),
        Some(Commands::Check) => _check(),
        Some(Commands::Config {
            command: ConfigCommands::Show,
        }) => _config_show(),
        Some(Commands::Config {
            command: ConfigCommands::Path,
        }) => _config_path(),
        Some(Commands::Completion { shell }) => _completion(*shell),
        // no subcommand: the one-shot render, both default formats
        None => _render(None, &[], None),
    }
}

#[instrument]
fn _render(
    out_dir: Option<&Path>,
    formats: &[OutputFormat],
    basename: Option<&str>,
) -> ChartResult<()> {
    debug!(
        "out_dir: {:?}, formats: {:?}, basename: {:?}",
        out_dir, formats, basename
    );
    let mut settings = Settings::load()?;
    if let Some(dir) = out_dir {
        settings.output.directory = dir.to_path_buf();
    }
    if !formats.is_empty() {
        settings.output.formats = formats.to_vec();
    }
    if let Some(name) = basename {
        settings.output.basename = name.to_string();
    }

    let written = render_flowchart(&settings)?;
    for path in written {
        output::success(&format!("Generated: {}", path.display()));
    }
    Ok(())
}

#[instrument]
fn _dot() -> ChartResult<()> {
    print!("{}", flowchart_dot()?);
    Ok(())
}

#[instrument]
fn _tree() -> ChartResult<()> {
    let flowchart = ChartBuilder::new().build()?;
    if let Some(tree) = flowchart.chart.to_display_tree() {
        println!("{}", tree);
    }
    Ok(())
}

#[instrument]
fn _paths() -> ChartResult<()> {
    let flowchart = ChartBuilder::new().build()?;
    for line in flowchart.chart.decision_paths() {
        println!("{}", line);
    }
    Ok(())
}

#[instrument]
fn _check() -> ChartResult<()> {
    let settings = Settings::load()?;

    // build() validates every structural invariant
    let flowchart = ChartBuilder::new().build()?;
    output::success(&format!(
        "chart structure valid: {} nodes, {} edges, depth {}",
        flowchart.chart.node_count(),
        flowchart.chart.edge_count(),
        flowchart.chart.depth()
    ));

    let renderer = GraphvizRenderer::new(settings.graphviz.program.as_str());
    match renderer.version()? {
        Some(version) => output::success(&format!(
            "graphviz {} found ({})",
            version,
            settings.graphviz.program
        )),
        None => output::warning(&format!(
            "'{}' responded but its version banner was unrecognized",
            settings.graphviz.program
        )),
    }
    Ok(())
}

#[instrument]
fn _config_show() -> ChartResult<()> {
    let settings = Settings::load()?;
    output::info(&toml::to_string_pretty(&settings)?);
    Ok(())
}

#[instrument]
fn _config_path() -> ChartResult<()> {
    match Settings::global_config_path() {
        Some(path) => output::info(&path.display()),
        None => output::warning("no home directory found"),
    }
    Ok(())
}

fn _completion(shell: clap_complete::Shell) -> ChartResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
