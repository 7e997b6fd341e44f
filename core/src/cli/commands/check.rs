use super::{load, print_json};
use crate::cli::OutputFormat;
use crate::entry::Entry;
use crate::tree::EntryTree;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct CheckSummary {
    pub path: String,
    pub classes: usize,
    pub fields: usize,
    pub methods: usize,
    /// Nodes including ancestors synthesized without a mapping.
    pub nodes: usize,
}

impl CheckSummary {
    pub fn from_tree(path: &Path, mappings: &EntryTree) -> Self {
        let mut summary = Self {
            path: path.display().to_string(),
            nodes: mappings.node_count(),
            ..Self::default()
        };
        for (entry, _) in mappings.values() {
            match entry {
                Entry::Class(_) => summary.classes += 1,
                Entry::Field(_) => summary.fields += 1,
                Entry::Method(_) => summary.methods += 1,
            }
        }
        summary
    }
}

pub fn run(path: &Path, format: OutputFormat) -> Result<(), String> {
    let mappings = load(path)?;
    let summary = CheckSummary::from_tree(path, &mappings);

    if format == OutputFormat::Json {
        return print_json(&summary);
    }

    println!("{} {}", "ok".green().bold(), summary.path);
    println!("  classes: {}", summary.classes);
    println!("  fields:  {}", summary.fields);
    println!("  methods: {}", summary.methods);
    println!("  {}", format!("{} nodes", summary.nodes).dimmed());
    Ok(())
}
