//! Mapping tree keyed by symbol identity.
//!
//! Every node is addressed by its `Entry`. Members hang under their owner
//! class and nested classes under their outer class; top-level classes are
//! the roots. Ancestors missing at insertion time are created without a
//! value, which means "name unchanged".

use std::collections::{HashMap, HashSet};

use crate::entry::Entry;
use crate::error::Result;

/// The rename stored at a node: the destination simple name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryMapping {
    target_name: String,
}

impl EntryMapping {
    pub fn new(target_name: impl Into<String>) -> Self {
        Self {
            target_name: target_name.into(),
        }
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }
}

#[derive(Debug, Clone)]
pub struct EntryTreeNode<M> {
    entry: Entry,
    value: Option<M>,
    children: HashSet<Entry>,
}

impl<M> EntryTreeNode<M> {
    fn new(entry: Entry) -> Self {
        Self {
            entry,
            value: None,
            children: HashSet::new(),
        }
    }

    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    pub fn value(&self) -> Option<&M> {
        self.value.as_ref()
    }

    /// Direct children, in no particular order.
    pub fn children(&self) -> impl Iterator<Item = &Entry> {
        self.children.iter()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct EntryTree<M = EntryMapping> {
    nodes: HashMap<Entry, EntryTreeNode<M>>,
    roots: HashSet<Entry>,
}

impl<M> Default for EntryTree<M> {
    fn default() -> Self {
        Self {
            nodes: HashMap::new(),
            roots: HashSet::new(),
        }
    }
}

impl<M> EntryTree<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the value at `entry`, creating missing ancestors.
    /// Children of an existing node are kept. Returns the previous value.
    pub fn insert(&mut self, entry: impl Into<Entry>, value: M) -> Result<Option<M>> {
        let entry = entry.into();
        entry.validate()?;
        Ok(self.ensure_node(&entry).value.replace(value))
    }

    fn ensure_node(&mut self, entry: &Entry) -> &mut EntryTreeNode<M> {
        if !self.nodes.contains_key(entry) {
            match entry.parent() {
                Some(parent) => {
                    self.ensure_node(&parent).children.insert(entry.clone());
                }
                None => {
                    self.roots.insert(entry.clone());
                }
            }
        }
        self.nodes
            .entry(entry.clone())
            .or_insert_with(|| EntryTreeNode::new(entry.clone()))
    }

    /// The node for `entry`; absence is not an error.
    pub fn find_node(&self, entry: &Entry) -> Option<&EntryTreeNode<M>> {
        self.nodes.get(entry)
    }

    pub fn get(&self, entry: &Entry) -> Option<&M> {
        self.find_node(entry).and_then(EntryTreeNode::value)
    }

    pub fn contains(&self, entry: &Entry) -> bool {
        self.get(entry).is_some()
    }

    /// Direct children of `entry`, empty if the node does not exist.
    pub fn children<'a>(&'a self, entry: &Entry) -> impl Iterator<Item = &'a Entry> + 'a
    where
        M: 'a,
    {
        self.find_node(entry)
            .into_iter()
            .flat_map(EntryTreeNode::children)
    }

    /// Top-level entries. Borrowing the tree, so it can be walked again.
    pub fn root_entries(&self) -> impl Iterator<Item = &Entry> {
        self.roots.iter()
    }

    /// Every node, with or without a value.
    pub fn all_entries(&self) -> impl Iterator<Item = &Entry> {
        self.nodes.keys()
    }

    /// Entries that carry a value, with that value.
    pub fn values(&self) -> impl Iterator<Item = (&Entry, &M)> {
        self.nodes
            .values()
            .filter_map(|node| node.value().map(|value| (node.entry(), value)))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of nodes carrying a value.
    pub fn len(&self) -> usize {
        self.nodes.values().filter(|n| n.value.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
