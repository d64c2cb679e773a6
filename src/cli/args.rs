//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::render::OutputFormat;

/// Render the substitution/elimination mechanism decision flowchart via Graphviz
#[derive(Parser, Debug)]
#[command(name = "snechart")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging (-d, -dd, -ddd for more)
    #[arg(short = 'd', long = "debug", action = ArgAction::Count, global = true)]
    pub debug: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the flowchart image files (also the default action)
    Render {
        /// Output directory
        #[arg(short, long, env = "SNECHART_OUT_DIR")]
        out_dir: Option<PathBuf>,

        /// Output format; repeat for several
        #[arg(short, long, value_enum)]
        format: Vec<OutputFormat>,

        /// Output file basename
        #[arg(short, long)]
        basename: Option<String>,
    },

    /// Print DOT source to stdout
    Dot,

    /// Show the decision hierarchy as a tree
    Tree,

    /// List every decision path linearly
    Paths,

    /// Validate chart structure and probe the Graphviz installation
    Check,

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config file location
    Path,
}
