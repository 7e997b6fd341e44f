//! Hierarchical store of symbol renames for JVM class files.
//!
//! Classes, fields and methods are keyed by their original identity in an
//! [`EntryTree`]; a [`MappingTranslator`] computes renamed identities from it,
//! and [`format::jadx`] reads and writes the jadx deobfuscation map format.

pub mod class_namer;
pub mod entry;
pub mod error;
pub mod format;
pub mod progress;
pub mod translate;
pub mod tree;

#[cfg(feature = "cli")]
pub mod cli;

pub use entry::{ClassEntry, Entry, FieldEntry, MethodEntry};
pub use error::{MappingError, Result};
pub use progress::{LogProgress, NoProgress, ProgressListener};
pub use translate::{EntryResolver, MappingTranslator, Translator, VoidResolver};
pub use tree::{EntryMapping, EntryTree, EntryTreeNode};
