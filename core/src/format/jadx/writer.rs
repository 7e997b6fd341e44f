use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::HEADER;
use crate::entry::{ClassEntry, Entry, FieldEntry, MethodEntry};
use crate::error::Result;
use crate::progress::ProgressListener;
use crate::translate::{MappingTranslator, Translator, VoidResolver};
use crate::tree::{EntryMapping, EntryTree};

/// Write `mappings` to `path`, replacing any existing file.
///
/// The output file is closed on every path; a failed write surfaces as an
/// error and leaves the tree untouched.
pub fn write(
    mappings: &EntryTree<EntryMapping>,
    path: &Path,
    progress: &mut dyn ProgressListener,
) -> Result<()> {
    MappingLines::collect(mappings, progress).write_file(path, progress)
}

/// Write `mappings` to any sink.
pub fn write_to<W: Write>(
    mappings: &EntryTree<EntryMapping>,
    mut out: W,
    progress: &mut dyn ProgressListener,
) -> Result<()> {
    MappingLines::collect(mappings, progress).write_to(&mut out, progress)?;
    out.flush()?;
    Ok(())
}

/// The four output buckets, in the order they are written.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MappingLines {
    packages: BTreeSet<String>,
    classes: Vec<String>,
    fields: Vec<String>,
    methods: Vec<String>,
}

impl MappingLines {
    /// Walk the tree from its sorted roots, parents before children.
    pub fn collect(mappings: &EntryTree<EntryMapping>, progress: &mut dyn ProgressListener) -> Self {
        let translator = MappingTranslator::new(mappings, &VoidResolver);
        let roots = sorted(mappings.root_entries());
        progress.init(roots.len(), "Generating jadx mappings");

        let mut lines = Self::default();
        for (step, entry) in roots.into_iter().enumerate() {
            progress.step(step, entry.name());
            lines.visit(mappings, &translator, entry);
        }
        lines
    }

    fn visit(&mut self, mappings: &EntryTree<EntryMapping>, translator: &dyn Translator, entry: &Entry) {
        let Some(node) = mappings.find_node(entry) else {
            return;
        };
        let mapped = node.value().is_some();

        match entry {
            Entry::Class(class) => {
                if let Some(mapping) = node.value() {
                    self.classes.push(class_line(class, mapping));
                }
                if let Some(line) = package_line(class, translator) {
                    self.packages.insert(line);
                }
            }
            Entry::Field(field) if mapped => self.fields.push(field_line(field, translator)),
            Entry::Method(method) if mapped => self.methods.push(method_line(method, translator)),
            Entry::Field(_) | Entry::Method(_) => {}
        }

        for child in sorted(node.children()) {
            self.visit(mappings, translator, child);
        }
    }

    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.packages.iter().map(String::as_str)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn methods(&self) -> &[String] {
        &self.methods
    }

    /// Every record line in file order, header excluded.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.packages()
            .chain(self.classes.iter().map(String::as_str))
            .chain(self.fields.iter().map(String::as_str))
            .chain(self.methods.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.packages.len() + self.classes.len() + self.fields.len() + self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write to `path`, replacing any existing file.
    pub fn write_file(&self, path: &Path, progress: &mut dyn ProgressListener) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.write_to(&mut writer, progress)?;
        writer.flush()?;
        log::info!(
            "[jadx_writer] Wrote {} lines to {}",
            self.len(),
            path.display()
        );
        Ok(())
    }

    /// Emit the header and the buckets, `\n`-terminated.
    pub fn write_to(&self, out: &mut dyn Write, progress: &mut dyn ProgressListener) -> io::Result<()> {
        progress.init(4, "Writing jadx mappings");
        writeln!(out, "{HEADER}")?;

        progress.step(0, "packages");
        for line in &self.packages {
            writeln!(out, "{line}")?;
        }
        progress.step(1, "classes");
        for line in &self.classes {
            writeln!(out, "{line}")?;
        }
        progress.step(2, "fields");
        for line in &self.fields {
            writeln!(out, "{line}")?;
        }
        progress.step(3, "methods");
        for line in &self.methods {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

/// Siblings ordered by display name; ties (overloads) by full identity.
fn sorted<'a>(entries: impl Iterator<Item = &'a Entry>) -> Vec<&'a Entry> {
    let mut sorted: Vec<&Entry> = entries.collect();
    sorted.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.cmp(b)));
    sorted
}

/// The stored target is printed as-is so a read-write cycle keeps it intact.
fn class_line(class: &ClassEntry, mapping: &EntryMapping) -> String {
    format!("c {} = {}", class.dotted_name(), mapping.target_name())
}

/// `p <source package> = <last segment of the translated package>`, for
/// classes outside the default package.
fn package_line(class: &ClassEntry, translator: &dyn Translator) -> Option<String> {
    let source_package = class.package_name();
    if source_package.is_empty() {
        return None;
    }
    let target = translator.translate_class(class);
    let target_package = target.package_name();
    let last_segment = target_package
        .rsplit_once('/')
        .map_or(target_package, |(_, last)| last);
    Some(format!(
        "p {} = {}",
        source_package.replace('/', "."),
        last_segment
    ))
}

fn field_line(field: &FieldEntry, translator: &dyn Translator) -> String {
    let target = translator.translate_field(field);
    format!(
        "f {}.{}:{} = {}",
        field.owner().dotted_name(),
        field.name(),
        field.desc(),
        target.name()
    )
}

fn method_line(method: &MethodEntry, translator: &dyn Translator) -> String {
    let target = translator.translate_method(method);
    format!(
        "m {}.{}{} = {}",
        method.owner().dotted_name(),
        method.name(),
        method.desc(),
        target.name()
    )
}
