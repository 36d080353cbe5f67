//! Process command implementation

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use tracing::debug;
use tsumugi_core::OutputFormat;

use crate::cli::Cli;
use crate::output::{output_failure, output_result};
use crate::utils::{create_tokio_runtime, load_config, read_input};

pub fn run_process(
    cli: &Cli,
    file: &Path,
    output: Option<OutputFormat>,
    out: Option<&Path>,
) -> Result<bool> {
    let mut config = load_config(cli)?;
    if let Some(output) = output {
        config.output = output;
    }

    let runtime = create_tokio_runtime()?;
    let mut input = runtime.block_on(read_input(file))?;

    let processor = config
        .build_processor(input.extension())
        .into_diagnostic()?;
    debug!("Pipeline: {}", processor.plugins().join(" -> "));

    match runtime.block_on(processor.process_file(&mut input)) {
        Ok(()) => output_result(&input, out),
        Err(e) => {
            output_failure(&input);
            Err(e).into_diagnostic()
        }
    }
}
