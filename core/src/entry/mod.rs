//! Structural identities of classes, fields and methods.
//!
//! An identity is independent of any rename: it is the key under which a
//! mapping is stored. Equality and hashing are structural, so two identities
//! built from the same parts address the same tree node.

pub mod descriptor;

use std::fmt;

use crate::error::{MappingError, Result};
use descriptor::{MethodDescriptor, TypeDescriptor};

/// A class, by its internal `/`-separated name (e.g. `a/b/Foo$Bar`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassEntry {
    name: String,
}

impl ClassEntry {
    /// Build a class identity, normalizing `.` separators to `/`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let name = if name.contains('.') {
            name.replace('.', "/")
        } else {
            name
        };
        Self { name }
    }

    pub fn full_name(&self) -> &str {
        &self.name
    }

    /// All but the last `/` segment, or `""` for the default package.
    pub fn package_name(&self) -> &str {
        self.name.rsplit_once('/').map_or("", |(package, _)| package)
    }

    /// The last `/` segment.
    pub fn simple_name(&self) -> &str {
        self.name.rsplit_once('/').map_or(&self.name, |(_, simple)| simple)
    }

    /// The class name with `.` separators, as the jadx format prints it.
    pub fn dotted_name(&self) -> String {
        self.name.replace('/', ".")
    }

    /// Byte offset of the `$` separating an outer class from this one, if
    /// this is a nested class.
    fn inner_separator(&self) -> Option<usize> {
        let simple_start = self.name.len() - self.simple_name().len();
        let simple = self.simple_name();
        let idx = simple.rfind('$')?;
        if idx == 0 || idx + 1 == simple.len() {
            return None;
        }
        Some(simple_start + idx)
    }

    pub fn is_inner(&self) -> bool {
        self.inner_separator().is_some()
    }

    /// The enclosing class of a nested class.
    pub fn outer_class(&self) -> Option<ClassEntry> {
        let sep = self.inner_separator()?;
        Some(Self {
            name: self.name[..sep].to_owned(),
        })
    }

    /// The name a rename applies to: the part after `$` for nested classes,
    /// the simple name otherwise.
    pub fn inner_name(&self) -> &str {
        match self.inner_separator() {
            Some(sep) => &self.name[sep + 1..],
            None => self.simple_name(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(MappingError::invalid_identity(&self.name, "empty class name"));
        }
        if self.name.split('/').any(str::is_empty) {
            return Err(MappingError::invalid_identity(
                &self.name,
                "empty path segment",
            ));
        }
        Ok(())
    }
}

impl fmt::Display for ClassEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A field, identified by owner, name and type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldEntry {
    owner: ClassEntry,
    name: String,
    desc: TypeDescriptor,
}

impl FieldEntry {
    pub fn new(owner: ClassEntry, name: impl Into<String>, desc: TypeDescriptor) -> Self {
        Self {
            owner,
            name: name.into(),
            desc,
        }
    }

    /// Parse `<owner>.<name>:<type>`. The type starts after the last `:`, the
    /// owner ends at the last `.` before it.
    pub fn parse(spec: &str) -> Result<Self> {
        let desc_sep = spec
            .rfind(':')
            .ok_or_else(|| MappingError::invalid_identity(spec, "missing ':' before field type"))?;
        let head = &spec[..desc_sep];
        let owner_sep = head
            .rfind('.')
            .ok_or_else(|| MappingError::invalid_identity(spec, "missing '.' after owner"))?;

        let owner = ClassEntry::new(&head[..owner_sep]);
        let name = &head[owner_sep + 1..];
        let desc = TypeDescriptor::parse(&spec[desc_sep + 1..])?;

        let entry = Self::new(owner, name, desc);
        entry.validate(spec)?;
        Ok(entry)
    }

    pub fn owner(&self) -> &ClassEntry {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn desc(&self) -> &TypeDescriptor {
        &self.desc
    }

    fn validate(&self, spec: &str) -> Result<()> {
        validate_member(&self.owner, &self.name, spec)
    }
}

impl fmt::Display for FieldEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}:{}", self.owner, self.name, self.desc)
    }
}

/// A method, identified by owner, name and signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodEntry {
    owner: ClassEntry,
    name: String,
    desc: MethodDescriptor,
}

impl MethodEntry {
    pub fn new(owner: ClassEntry, name: impl Into<String>, desc: MethodDescriptor) -> Self {
        Self {
            owner,
            name: name.into(),
            desc,
        }
    }

    /// Parse `<owner>.<name>(<args>)<ret>`. The signature starts at the first
    /// `(`, the owner ends at the last `.` before it.
    pub fn parse(spec: &str) -> Result<Self> {
        let sig_sep = spec
            .find('(')
            .ok_or_else(|| MappingError::invalid_identity(spec, "missing '(' of signature"))?;
        let head = &spec[..sig_sep];
        let owner_sep = head
            .rfind('.')
            .ok_or_else(|| MappingError::invalid_identity(spec, "missing '.' after owner"))?;

        let owner = ClassEntry::new(&head[..owner_sep]);
        let name = &head[owner_sep + 1..];
        let desc = MethodDescriptor::parse(&spec[sig_sep..])?;

        let entry = Self::new(owner, name, desc);
        entry.validate(spec)?;
        Ok(entry)
    }

    pub fn owner(&self) -> &ClassEntry {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn desc(&self) -> &MethodDescriptor {
        &self.desc
    }

    fn validate(&self, spec: &str) -> Result<()> {
        validate_member(&self.owner, &self.name, spec)
    }
}

impl fmt::Display for MethodEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}{}", self.owner, self.name, self.desc)
    }
}

fn validate_member(owner: &ClassEntry, name: &str, spec: &str) -> Result<()> {
    if owner.full_name().is_empty() {
        return Err(MappingError::invalid_identity(spec, "empty owner"));
    }
    owner.validate()?;
    if name.is_empty() {
        return Err(MappingError::invalid_identity(spec, "empty member name"));
    }
    Ok(())
}

/// Any symbol that can carry a mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Entry {
    Class(ClassEntry),
    Field(FieldEntry),
    Method(MethodEntry),
}

impl Entry {
    /// Display name used to order siblings: the full name of a class, the
    /// plain name of a member.
    pub fn name(&self) -> &str {
        match self {
            Self::Class(class) => class.full_name(),
            Self::Field(field) => field.name(),
            Self::Method(method) => method.name(),
        }
    }

    /// The owning node: the owner class of a member, the outer class of a
    /// nested class, nothing for a top-level class.
    pub fn parent(&self) -> Option<Entry> {
        match self {
            Self::Class(class) => class.outer_class().map(Entry::Class),
            Self::Field(field) => Some(Entry::Class(field.owner().clone())),
            Self::Method(method) => Some(Entry::Class(method.owner().clone())),
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Class(class) => class.validate(),
            Self::Field(field) => field.validate(&field.to_string()),
            Self::Method(method) => method.validate(&method.to_string()),
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Class(class) => class.fmt(f),
            Self::Field(field) => field.fmt(f),
            Self::Method(method) => method.fmt(f),
        }
    }
}

impl From<ClassEntry> for Entry {
    fn from(entry: ClassEntry) -> Self {
        Self::Class(entry)
    }
}

impl From<FieldEntry> for Entry {
    fn from(entry: FieldEntry) -> Self {
        Self::Field(entry)
    }
}

impl From<MethodEntry> for Entry {
    fn from(entry: MethodEntry) -> Self {
        Self::Method(entry)
    }
}
