use super::{describe, load, print_json};
use crate::cli::OutputFormat;
use crate::format::jadx::MappingLines;
use crate::progress::LogProgress;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, PartialEq, Eq, Serialize)]
struct RewriteSummary {
    input: String,
    output: String,
    lines: usize,
}

/// Read `input` and write it to `output` in canonical order.
fn rewrite(input: &Path, output: &Path) -> Result<RewriteSummary, String> {
    let mappings = load(input)?;
    let mut progress = LogProgress::default();
    let lines = MappingLines::collect(&mappings, &mut progress);
    lines
        .write_file(output, &mut progress)
        .map_err(|e| describe(output, &e))?;

    Ok(RewriteSummary {
        input: input.display().to_string(),
        output: output.display().to_string(),
        lines: lines.len(),
    })
}

pub fn run(input: &Path, output: &Path, format: OutputFormat) -> Result<(), String> {
    let summary = rewrite(input, output)?;

    if format == OutputFormat::Json {
        return print_json(&summary);
    }

    println!(
        "{} {} -> {} ({} lines)",
        "wrote".green().bold(),
        summary.input,
        summary.output,
        summary.lines
    );
    Ok(())
}
