//! CLI output formatting.
//!
//! Entries are listed by position and text, with the link as context:
//!
//! ```text
//! Documentation Navigation
//! 001 Home → /
//! 002 About → /about
//! 003 Guide → /guide/index
//!     001 Advanced → /guide/advanced
//!         001 Tuning → /guide/advanced/tuning
//!     002 Install → /guide/install
//! 004 Change Log → /changelog
//!
//! Skipped
//!     guide/broken.md: No such file or directory (os error 2)
//!
//! 4 top-level entries, 7 total
//! ```
//!
//! `format_*` functions are pure and return lines; `print_*` wrappers write
//! them to stdout.

use crate::generate::Generated;
use crate::scan::EntryError;
use crate::types::{NavNode, SidebarDocument};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn node_lines(nodes: &[NavNode], depth: usize, lines: &mut Vec<String>) {
    for (i, node) in nodes.iter().enumerate() {
        lines.push(format!(
            "{}{} {} → {}",
            indent(depth),
            format_index(i + 1),
            node.text,
            node.link
        ));
        node_lines(&node.children, depth + 1, lines);
    }
}

/// The navigation tree, headed by the document title.
pub fn format_document(doc: &SidebarDocument) -> Vec<String> {
    let mut lines = vec![doc.title.clone()];
    node_lines(doc.top_level(), 0, &mut lines);
    lines
}

/// Skipped entries with paths relative to `content_root` where possible.
pub fn format_skipped(skipped: &[EntryError], content_root: &Path) -> Vec<String> {
    if skipped.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![String::new(), "Skipped".to_string()];
    for error in skipped {
        let path = error.path();
        let shown = path.strip_prefix(content_root).unwrap_or(path);
        let reason = match error {
            EntryError::Io { source, .. } => source.to_string(),
            EntryError::SymlinkLoop(_) => "symlink loop".to_string(),
            EntryError::NonUtf8Name(_) => "name is not valid UTF-8".to_string(),
            EntryError::ExtensionDirName(_) => "directory named like a page".to_string(),
            EntryError::DuplicateLink { link, .. } => format!("duplicate link {link}"),
        };
        lines.push(format!("{}{}: {}", indent(1), shown.display(), reason));
    }
    lines
}

/// Counts line: top-level entries and all entries.
pub fn format_summary(doc: &SidebarDocument) -> String {
    let top = doc.top_level().len();
    let total = doc.nodes().count();
    format!("{top} top-level entries, {total} total")
}

/// Full report for `generate` and `check`.
pub fn format_generated(generated: &Generated, content_root: &Path) -> Vec<String> {
    let mut lines = format_document(&generated.document);
    lines.extend(format_skipped(&generated.skipped, content_root));
    lines.push(String::new());
    lines.push(format_summary(&generated.document));
    lines
}

pub fn print_generated(generated: &Generated, content_root: &Path) {
    for line in format_generated(generated, content_root) {
        println!("{}", line);
    }
}

pub fn print_document(doc: &SidebarDocument) {
    for line in format_document(doc) {
        println!("{}", line);
    }
    println!();
    println!("{}", format_summary(doc));
}
