//! Inspect command implementation

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use tsumugi_ast::{NodeKind, visit};

use crate::cli::Cli;
use crate::utils::{create_tokio_runtime, load_config, read_input};

pub fn run_inspect(cli: &Cli, file: &Path, kind: &str) -> Result<()> {
    let kind: NodeKind = kind.parse().into_diagnostic()?;
    let config = load_config(cli)?;

    let runtime = create_tokio_runtime()?;
    let input = runtime.block_on(read_input(file))?;

    let processor = config
        .build_processor(input.extension())
        .into_diagnostic()?;
    let tree = processor.parse(&input).into_diagnostic()?;

    let mut count = 0;
    visit(&tree, kind, |node| {
        count += 1;
        let location = node
            .position()
            .map(|p| {
                format!(
                    "{}:{}-{}:{}",
                    p.start.line, p.start.column, p.end.line, p.end.column
                )
            })
            .unwrap_or_else(|| "-".to_string());
        println!("{:<12} {}", location, node.to_text());
    });

    eprintln!("{}: {} {} node(s)", input.display_name(), count, kind);
    Ok(())
}
