//! The jadx deobfuscation map format.
//!
//! ```text
//! <header>                                   (ignored on read)
//! p <src.package> = <dst-last-segment>
//! c <src.Class> = <DstSimpleName>
//! f <src.Class>.<name>:<type> = <dstName>
//! m <src.Class>.<name>(<args>)<ret> = <dstName>
//! # comment
//! ```
//!
//! Package lines are derived on write and skipped on read.

pub mod reader;
pub mod writer;

pub use reader::{parse_entry, parse_line, read, read_lines};
pub use writer::{write, write_to, MappingLines};

/// First line of every written file; readers discard line 0 unconditionally.
pub const HEADER: &str = "# jadx deobfuscation map";
