use std::fs;
use std::path::Path;

use crate::entry::{ClassEntry, Entry, FieldEntry, MethodEntry};
use crate::error::{MappingError, Result};
use crate::progress::ProgressListener;
use crate::tree::{EntryMapping, EntryTree};

/// Read a jadx mapping file into a fresh tree.
pub fn read(path: &Path, progress: &mut dyn ProgressListener) -> Result<EntryTree> {
    let content = fs::read_to_string(path)?;
    let lines: Vec<&str> = content.lines().collect();
    read_lines(&path.display().to_string(), &lines, progress)
}

/// Parse already-split lines. `source` names the origin in errors.
///
/// Line 0 is a header and is discarded. Fails on the first bad record; the
/// reported line index counts from the start of `lines`, header included.
pub fn read_lines<S: AsRef<str>>(
    source: &str,
    lines: &[S],
    progress: &mut dyn ProgressListener,
) -> Result<EntryTree> {
    let mut mappings = EntryTree::new();
    let Some((_header, body)) = lines.split_first() else {
        return Ok(mappings);
    };

    progress.init(body.len(), "Loading jadx mappings");

    for (offset, raw) in body.iter().enumerate() {
        let line_number = offset + 1;
        progress.step(offset, "");

        let line = raw.as_ref().trim();
        if line.starts_with('#') || line.starts_with('p') {
            continue;
        }

        parse_line(line)
            .and_then(|(entry, mapping)| mappings.insert(entry, mapping))
            .map_err(|e| {
                log::warn!("[jadx_reader] {source}:{line_number}: {e}");
                MappingError::parse(source, line_number, &e)
            })?;
    }

    log::debug!(
        "[jadx_reader] Loaded {} mappings ({} nodes) from {source}",
        mappings.len(),
        mappings.node_count()
    );
    Ok(mappings)
}

/// Parse one trimmed record line: `<kind> <source> = <target>`.
pub fn parse_line(line: &str) -> Result<(Entry, EntryMapping)> {
    let tokens: Vec<&str> = line.split(' ').collect();

    let kind = tokens.first().copied().unwrap_or_default();
    if !matches!(kind, "c" | "f" | "m") {
        return Err(MappingError::UnknownRecordKind(kind.to_owned()));
    }

    let [_, spec, _, target, ..] = tokens.as_slice() else {
        return Err(MappingError::malformed_record(
            line,
            "expected '<kind> <source> = <target>'",
        ));
    };
    if target.is_empty() {
        return Err(MappingError::malformed_record(line, "empty target name"));
    }
    if kind == "c" && target.contains(['$', '.', '/']) {
        return Err(MappingError::malformed_record(
            line,
            "class target must be a simple name",
        ));
    }

    Ok((parse_entry(kind, spec)?, EntryMapping::new(*target)))
}

/// Build the identity named by a record kind (`c`, `f` or `m`) and its source spec.
pub fn parse_entry(kind: &str, spec: &str) -> Result<Entry> {
    match kind {
        "c" => Ok(Entry::Class(ClassEntry::new(spec))),
        "f" => Ok(Entry::Field(FieldEntry::parse(spec)?)),
        "m" => Ok(Entry::Method(MethodEntry::parse(spec)?)),
        other => Err(MappingError::UnknownRecordKind(other.to_owned())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::tests::Recording;
    use crate::progress::NoProgress;

    fn read_str(input: &str) -> Result<EntryTree> {
        let lines: Vec<&str> = input.lines().collect();
        read_lines("test.jobf", &lines, &mut NoProgress)
    }

    fn class(name: &str) -> Entry {
        Entry::from(ClassEntry::new(name))
    }

    #[test]
    fn test_parse_class_line() {
        let (entry, mapping) = parse_line("c a.b.Foo = Bar").unwrap();
        assert_eq!(entry, class("a/b/Foo"));
        assert_eq!(mapping.target_name(), "Bar");
    }

    #[test]
    fn test_parse_field_line() {
        let (entry, mapping) = parse_line("f a.Foo.x:Ljava/lang/String; = label").unwrap();
        let Entry::Field(field) = entry else {
            panic!("Wrong variant");
        };
        assert_eq!(field.owner().full_name(), "a/Foo");
        assert_eq!(field.name(), "x");
        assert_eq!(field.desc().to_string(), "Ljava/lang/String;");
        assert_eq!(mapping.target_name(), "label");
    }

    #[test]
    fn test_parse_method_line() {
        let (entry, mapping) = parse_line("m a.Foo.<init>(I)V = create").unwrap();
        let Entry::Method(method) = entry else {
            panic!("Wrong variant");
        };
        assert_eq!(method.owner().full_name(), "a/Foo");
        assert_eq!(method.name(), "<init>");
        assert_eq!(method.desc().to_string(), "(I)V");
        assert_eq!(mapping.target_name(), "create");
    }

    #[test]
    fn test_parse_line_ignores_filler_token() {
        let (_, mapping) = parse_line("c a.Foo -> Bar").unwrap();
        assert_eq!(mapping.target_name(), "Bar");
    }

    #[test]
    fn test_parse_line_errors() {
        assert!(matches!(
            parse_line("x a.Foo = Bar"),
            Err(MappingError::UnknownRecordKind(k)) if k == "x"
        ));
        assert!(matches!(
            parse_line(""),
            Err(MappingError::UnknownRecordKind(k)) if k.is_empty()
        ));
        assert!(matches!(
            parse_line("c a.Foo ="),
            Err(MappingError::MalformedRecord { .. })
        ));
        assert!(matches!(
            parse_line("c a.Foo = "),
            Err(MappingError::MalformedRecord { .. })
        ));
        assert!(matches!(
            parse_line("f a.Foo.x = y"),
            Err(MappingError::InvalidIdentity { .. })
        ));
        assert!(matches!(
            parse_line("m a.Foo.run()Q = go"),
            Err(MappingError::Descriptor(_))
        ));
    }

    #[test]
    fn test_parse_line_rejects_qualified_class_target() {
        for line in ["c a.Foo = Outer$Inner", "c a.Foo = x.Bar", "c a.Foo = x/Bar"] {
            assert!(
                matches!(parse_line(line), Err(MappingError::MalformedRecord { .. })),
                "accepted {line}"
            );
        }
        // member targets are plain names and are not restricted
        assert!(parse_line("f a.Foo.x:I = this$0").is_ok());
    }

    #[test]
    fn test_parse_entry() {
        assert_eq!(parse_entry("c", "a.Foo").unwrap(), class("a/Foo"));
        assert_eq!(
            parse_entry("m", "a.Foo.run()V").unwrap().to_string(),
            "a/Foo.run()V"
        );
        assert!(matches!(
            parse_entry("p", "a.b"),
            Err(MappingError::UnknownRecordKind(k)) if k == "p"
        ));
    }

    #[test]
    fn test_read_builds_tree() {
        let tree = read_str(
            "header\n\
             c a.Foo = Bar\n\
             f a.Foo.x:I = count\n\
             m a.Foo.run()V = execute\n\
             m b.Baz.go(La/Foo;)V = start\n",
        )
        .unwrap();

        assert_eq!(tree.len(), 4);
        assert_eq!(
            tree.get(&class("a/Foo")).map(EntryMapping::target_name),
            Some("Bar")
        );
        // b/Baz was synthesized as an ancestor without a mapping
        assert!(tree.find_node(&class("b/Baz")).is_some());
        assert!(tree.get(&class("b/Baz")).is_none());
        assert_eq!(tree.root_entries().count(), 2);
    }

    #[test]
    fn test_read_discards_header_even_if_record() {
        let tree = read_str("c a.Foo = Bar\nc a.Baz = Qux").unwrap();
        assert!(tree.get(&class("a/Foo")).is_none());
        assert!(tree.get(&class("a/Baz")).is_some());
    }

    #[test]
    fn test_read_skips_comments_and_packages() {
        let tree = read_str(
            "header\n\
             # c this is not a record\n\
             \x20  #indented comment\n\
             p a.b = anything at all ::: (\n\
             pxyz\n\
             c a.Foo = Bar",
        )
        .unwrap();
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_read_trims_lines() {
        let tree = read_str("header\n   c a.Foo = Bar   ").unwrap();
        assert_eq!(
            tree.get(&class("a/Foo")).map(EntryMapping::target_name),
            Some("Bar")
        );
    }

    #[test]
    fn test_read_fails_fast_with_line_index() {
        let err = read_str("header\nc a.Foo = Bar\nx a.Baz = Qux\nthis would also fail").unwrap_err();
        match err {
            MappingError::Parse {
                path,
                line,
                message,
            } => {
                assert_eq!(path, "test.jobf");
                assert_eq!(line, 2);
                assert!(message.contains("'x'"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_wraps_invalid_identity() {
        let err = read_str("header\nc  = Bar").unwrap_err();
        assert_eq!(err.line(), Some(1));
        assert!(err.to_string().contains("empty class name"));
    }

    #[test]
    fn test_read_empty_input() {
        assert!(read_str("").unwrap().is_empty());
        assert!(read_str("header only").unwrap().is_empty());
    }

    #[test]
    fn test_read_reports_progress() {
        let mut progress = Recording::default();
        let lines = ["header", "c a.Foo = Bar", "# note"];
        read_lines("test", &lines[..], &mut progress).unwrap();
        assert_eq!(progress.inits, vec![(2, "Loading jadx mappings".to_owned())]);
        assert_eq!(progress.steps.len(), 2);
    }
}
