//! Shared neutral names for classes matched across two program versions.
//!
//! Each matched (source, dest) pair gets one name, `M0000`, `M0001`, ... in
//! pairing order, so both sides can be compared under one vocabulary.

use std::collections::HashMap;

use crate::entry::ClassEntry;
use crate::error::Result;
use crate::tree::{EntryMapping, EntryTree};

#[derive(Debug, Clone, Default)]
pub struct ClassNamer {
    source_names: HashMap<String, String>,
    dest_names: HashMap<String, String>,
}

impl ClassNamer {
    pub fn new(pairs: impl IntoIterator<Item = (ClassEntry, ClassEntry)>) -> Self {
        let mut namer = Self::default();
        for (index, (source, dest)) in pairs.into_iter().enumerate() {
            let name = format!("M{index:04}");
            namer
                .source_names
                .insert(source.full_name().to_owned(), name.clone());
            namer.dest_names.insert(dest.full_name().to_owned(), name);
        }
        namer
    }

    pub fn source_name(&self, name: &str) -> Option<&str> {
        self.source_names.get(name).map(String::as_str)
    }

    pub fn dest_name(&self, name: &str) -> Option<&str> {
        self.dest_names.get(name).map(String::as_str)
    }

    pub fn source_namer(&self) -> SidedClassNamer<'_> {
        SidedClassNamer {
            names: &self.source_names,
        }
    }

    pub fn dest_namer(&self) -> SidedClassNamer<'_> {
        SidedClassNamer {
            names: &self.dest_names,
        }
    }

    pub fn len(&self) -> usize {
        self.source_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source_names.is_empty()
    }
}

/// One side of a `ClassNamer`.
#[derive(Debug, Clone, Copy)]
pub struct SidedClassNamer<'a> {
    names: &'a HashMap<String, String>,
}

impl SidedClassNamer<'_> {
    pub fn name(&self, name: &str) -> Option<&str> {
        self.names.get(name).map(String::as_str)
    }

    /// A mapping tree renaming every class on this side to its shared name.
    pub fn to_tree(&self) -> Result<EntryTree> {
        let mut tree = EntryTree::new();
        for (class, shared) in self.names {
            tree.insert(ClassEntry::new(class.as_str()), EntryMapping::new(shared.as_str()))?;
        }
        Ok(tree)
    }
}
