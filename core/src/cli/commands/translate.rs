use super::{load, print_json};
use crate::cli::OutputFormat;
use crate::entry::Entry;
use crate::format::jadx;
use crate::translate::{MappingTranslator, Translator, VoidResolver};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Serialize)]
struct TranslateResult {
    source: String,
    translated: String,
    mapped: bool,
}

/// Split `"<kind> <spec>"` into an identity.
fn parse_record(record: &str) -> Result<Entry, String> {
    let (kind, spec) = record
        .trim()
        .split_once(' ')
        .ok_or_else(|| format!("Expected '<c|f|m> <identity>', got '{record}'"))?;
    let entry = jadx::parse_entry(kind, spec.trim()).map_err(|e| e.to_string())?;
    entry.validate().map_err(|e| e.to_string())?;
    Ok(entry)
}

pub fn run(path: &Path, record: &str, format: OutputFormat) -> Result<(), String> {
    let entry = parse_record(record)?;
    let mappings = load(path)?;
    let translated = MappingTranslator::new(&mappings, &VoidResolver).translate(&entry);

    let result = TranslateResult {
        source: entry.to_string(),
        translated: translated.to_string(),
        mapped: mappings.contains(&entry),
    };

    if format == OutputFormat::Json {
        return print_json(&result);
    }

    println!("{}", result.translated);
    Ok(())
}
