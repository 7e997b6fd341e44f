//! Computing the renamed form of an identity.
//!
//! A translated identity substitutes the stored rename for the entry itself
//! and, recursively, for its owner chain and every class referenced inside
//! its descriptor. Translation only reads the tree.

use crate::entry::{ClassEntry, Entry, FieldEntry, MethodEntry};
use crate::tree::{EntryMapping, EntryTree};

/// Decides which entry's mapping governs a given entry.
///
/// Returning `None` marks the entry as unresolvable, and the translator then
/// leaves it untranslated rather than guessing. Resolvers are shared by
/// translators used from several threads at once.
pub trait EntryResolver: Sync {
    fn resolve(&self, entry: &Entry) -> Option<Entry>;
}

/// Resolves every entry to itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoidResolver;

impl EntryResolver for VoidResolver {
    fn resolve(&self, entry: &Entry) -> Option<Entry> {
        Some(entry.clone())
    }
}

pub trait Translator {
    fn translate_class(&self, class: &ClassEntry) -> ClassEntry;
    fn translate_field(&self, field: &FieldEntry) -> FieldEntry;
    fn translate_method(&self, method: &MethodEntry) -> MethodEntry;

    fn translate(&self, entry: &Entry) -> Entry {
        match entry {
            Entry::Class(class) => Entry::Class(self.translate_class(class)),
            Entry::Field(field) => Entry::Field(self.translate_field(field)),
            Entry::Method(method) => Entry::Method(self.translate_method(method)),
        }
    }
}

/// Translates through an `EntryTree` of renames.
pub struct MappingTranslator<'a> {
    mappings: &'a EntryTree<EntryMapping>,
    resolver: &'a dyn EntryResolver,
}

impl<'a> MappingTranslator<'a> {
    pub fn new(mappings: &'a EntryTree<EntryMapping>, resolver: &'a dyn EntryResolver) -> Self {
        Self { mappings, resolver }
    }

    /// `Err(())` when the resolver refuses the entry; `Ok(None)` when it
    /// resolves but carries no rename.
    fn target_name(&self, entry: Entry) -> Result<Option<&'a str>, ()> {
        let resolved = self.resolver.resolve(&entry).ok_or(())?;
        Ok(self.mappings.get(&resolved).map(EntryMapping::target_name))
    }

    fn translate_class_name(&self, name: &str) -> String {
        self.translate_class(&ClassEntry::new(name))
            .full_name()
            .to_owned()
    }
}

impl Translator for MappingTranslator<'_> {
    fn translate_class(&self, class: &ClassEntry) -> ClassEntry {
        let Ok(target) = self.target_name(Entry::Class(class.clone())) else {
            return class.clone();
        };

        if let Some(outer) = class.outer_class() {
            let outer = self.translate_class(&outer);
            let inner = target.unwrap_or_else(|| class.inner_name());
            return ClassEntry::new(format!("{}${inner}", outer.full_name()));
        }

        match target {
            None => class.clone(),
            Some(target) if class.package_name().is_empty() => ClassEntry::new(target),
            Some(target) => ClassEntry::new(format!("{}/{target}", class.package_name())),
        }
    }

    fn translate_field(&self, field: &FieldEntry) -> FieldEntry {
        let Ok(target) = self.target_name(Entry::Field(field.clone())) else {
            return field.clone();
        };
        let name = target.unwrap_or_else(|| field.name());
        FieldEntry::new(
            self.translate_class(field.owner()),
            name,
            field.desc().remap(|c| self.translate_class_name(c)),
        )
    }

    fn translate_method(&self, method: &MethodEntry) -> MethodEntry {
        let Ok(target) = self.target_name(Entry::Method(method.clone())) else {
            return method.clone();
        };
        let name = target.unwrap_or_else(|| method.name());
        MethodEntry::new(
            self.translate_class(method.owner()),
            name,
            method.desc().remap(|c| self.translate_class_name(c)),
        )
    }
}
