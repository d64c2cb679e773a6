//! snechart: renders the substitution/elimination mechanism decision
//! flowchart to image files via Graphviz.
//!
//! The decision structure is a fixed, hand-authored tree (see
//! `domain::builder`); layout and rasterization are delegated to the
//! external `dot` engine (see `render::graphviz`).

use std::path::PathBuf;

use tracing::{info, instrument};

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod exitcode;
pub mod render;
pub mod util;

pub use config::Settings;
pub use domain::{ChartBuilder, Conditions, DecisionChart, Degree, Flowchart, Mechanism};
pub use errors::{ChartError, ChartResult};

/// Build the chart, serialize it and render every configured format.
///
/// Returns the written file paths in configuration order. Any engine
/// failure aborts the invocation; partially rendered output is invalid.
#[instrument(skip(settings))]
pub fn render_flowchart(settings: &Settings) -> ChartResult<Vec<PathBuf>> {
    let flowchart = ChartBuilder::new().build()?;
    let theme = render::Theme::classic().with_dpi(settings.graphviz.dpi);
    let dot_source = render::to_dot(&flowchart, &theme);

    let directory = &settings.output.directory;
    if !directory.as_os_str().is_empty() && !directory.exists() {
        std::fs::create_dir_all(directory).map_err(|source| ChartError::Io {
            path: directory.clone(),
            source,
        })?;
    }

    let renderer = render::GraphvizRenderer::new(settings.graphviz.program.as_str());
    let mut written = Vec::new();
    for &format in &settings.output.formats {
        let path = settings.output_path(format);
        renderer.render_to_file(&dot_source, format, &path)?;
        info!(path = %path.display(), "rendered");
        written.push(path);
    }
    Ok(written)
}

/// DOT source for the chart with the classic theme and default resolution.
pub fn flowchart_dot() -> ChartResult<String> {
    let flowchart = ChartBuilder::new().build()?;
    Ok(render::to_dot(&flowchart, &render::Theme::classic()))
}
