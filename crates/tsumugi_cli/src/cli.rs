//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tsumugi_core::OutputFormat;

/// Tsumugi - plugin-driven Markdown processor
#[derive(Parser)]
#[command(name = "tsumugi")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse, transform and compile a document
    Process {
        /// Input file, or `-` for stdin
        file: PathBuf,

        /// Output format (overrides the configuration)
        #[arg(short, long, value_enum)]
        output: Option<OutputArg>,

        /// Write the result to a file instead of stdout
        #[arg(long, value_name = "PATH")]
        out: Option<PathBuf>,
    },

    /// List every node of a kind in a document
    Inspect {
        /// Input file, or `-` for stdin
        file: PathBuf,

        /// Node kind to list (e.g. heading, listItem)
        #[arg(short, long)]
        kind: String,
    },

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    Json,
    Text,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Json => OutputFormat::Json,
            OutputArg::Text => OutputFormat::Text,
        }
    }
}
