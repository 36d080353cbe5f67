//! CLI utility functions

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use tokio::runtime::Runtime;
use tracing::debug;
use tsumugi_core::{PipelineConfig, VFile};

use crate::cli::Cli;

pub fn create_tokio_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .into_diagnostic()
}

/// Loads the configuration named by `--config`, or the one found in the
/// current directory, or the defaults.
pub fn load_config(cli: &Cli) -> Result<PipelineConfig> {
    if let Some(ref path) = cli.config {
        return PipelineConfig::from_file(path).into_diagnostic();
    }

    let cwd = std::env::current_dir().into_diagnostic()?;
    match PipelineConfig::discover(&cwd) {
        Some(path) => {
            debug!("Using config {}", path.display());
            PipelineConfig::from_file(&path).into_diagnostic()
        }
        None => {
            debug!("No config file found, using defaults");
            Ok(PipelineConfig::default())
        }
    }
}

/// Reads the input document; `-` reads stdin.
pub async fn read_input(path: &Path) -> Result<VFile> {
    if path.as_os_str() == "-" {
        let mut value = String::new();
        tokio::io::AsyncReadExt::read_to_string(&mut tokio::io::stdin(), &mut value)
            .await
            .into_diagnostic()?;
        return Ok(VFile::new(value));
    }

    VFile::read(path)
        .await
        .map_err(|e| miette::miette!("Failed to read {}: {}", path.display(), e))
}
