//! Output module

mod report;

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use tracing::info;
use tsumugi_core::VFile;

pub use report::render_report;

/// Writes the compiled value of `file` to `out` or stdout, and the message
/// report to stderr.
///
/// Returns whether the file carries error messages.
pub fn output_result(file: &VFile, out: Option<&Path>) -> Result<bool> {
    match out {
        Some(path) => {
            std::fs::write(path, &file.value).into_diagnostic()?;
            info!("Wrote {}", path.display());
        }
        None => {
            print!("{}", file.value);
            if !file.value.ends_with('\n') {
                println!();
            }
        }
    }

    eprint!("{}", render_report(file));

    Ok(file.has_errors())
}

/// Writes the message report of a file whose processing failed.
///
/// Nothing is written to stdout since the file holds no compiled value.
pub fn output_failure(file: &VFile) {
    if !file.messages.is_empty() {
        eprint!("{}", render_report(file));
    }
}
