pub mod check;
pub mod rewrite;
pub mod translate;

use crate::error::MappingError;
use crate::format::jadx;
use crate::progress::LogProgress;
use crate::tree::EntryTree;
use std::path::Path;

/// Read a mapping file, logging progress at debug level.
fn load(path: &Path) -> Result<EntryTree, String> {
    jadx::read(path, &mut LogProgress::default()).map_err(|e| describe(path, &e))
}

/// Parse errors already carry their location; everything else gets the path.
fn describe(path: &Path, error: &MappingError) -> String {
    match error {
        MappingError::Parse { .. } => error.to_string(),
        other => format!("{}: {other}", path.display()),
    }
}

/// Serialize a value as pretty-printed JSON and print it to stdout.
fn print_json(value: &impl serde::Serialize) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}
