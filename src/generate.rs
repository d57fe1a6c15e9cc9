//! Sidebar generation.
//!
//! Full regeneration: the content tree is scanned from scratch, wrapped with
//! the built-in entries, and the whole document at `config.output` is
//! replaced. The previous document is consulted for exactly one thing, an
//! existing top-level "Change Log" entry, which is carried over instead of
//! synthesised when the content tree has none of its own.
//!
//! ```text
//! items = [Home] ++ sorted(scan(content_root)) ++ [Change Log]?
//! menu  = items
//! ```
//!
//! Per-entry problems never fail a run; they come back in
//! [`Generated::skipped`]. Only a missing/unreadable content root (unless
//! `allow_missing_source` is set), a refused overwrite, or a failed write
//! are errors.

use crate::config::SidebarConfig;
use crate::document::{self, DocumentError};
use crate::scan::{self, EntryError, ScanError, ScanOutcome};
use crate::types::{CHANGELOG_LINK, NavNode, SidebarDocument};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SidebarError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("Sidebar already exists: {0} (set overwrite_existing = true to replace it)")]
    OutputExists(PathBuf),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// A generated document together with what was left out of it.
#[derive(Debug)]
pub struct Generated {
    pub document: SidebarDocument,
    pub skipped: Vec<EntryError>,
}

/// Regenerate the sidebar for `content_root` and write it to `config.output`.
pub fn generate(content_root: &Path, config: &SidebarConfig) -> Result<SidebarDocument, SidebarError> {
    generate_with_report(content_root, config).map(|g| g.document)
}

/// Like [`generate`], also returning the skipped entries.
pub fn generate_with_report(
    content_root: &Path,
    config: &SidebarConfig,
) -> Result<Generated, SidebarError> {
    let output = &config.output;
    if !config.overwrite_existing && output.exists() {
        return Err(SidebarError::OutputExists(output.clone()));
    }

    let previous = document::load_or_default(output, &config.title);
    let generated = build(content_root, config, Some(&previous), Utc::now())?;
    document::write_document(output, &generated.document)?;

    tracing::info!(
        top_level = generated.document.items.len(),
        skipped = generated.skipped.len(),
        "sidebar generated"
    );
    Ok(generated)
}

/// Build the document in memory without touching the output path.
pub fn build(
    content_root: &Path,
    config: &SidebarConfig,
    previous: Option<&SidebarDocument>,
    generated_at: DateTime<Utc>,
) -> Result<Generated, SidebarError> {
    let outcome = match scan::scan(content_root, config) {
        Ok(outcome) => outcome,
        Err(ScanError::MissingSource(path)) if config.allow_missing_source => {
            tracing::warn!(path = %path.display(), "content directory missing, writing built-in entries only");
            ScanOutcome::default()
        }
        Err(e) => return Err(e.into()),
    };

    let items = assemble(outcome.items, config, previous);
    Ok(Generated {
        document: SidebarDocument::new(config.title.clone(), items, generated_at),
        skipped: outcome.skipped,
    })
}

/// Wrap a scanned tree with Home and (if enabled) the changelog entry.
pub fn assemble(
    tree: Vec<NavNode>,
    config: &SidebarConfig,
    previous: Option<&SidebarDocument>,
) -> Vec<NavNode> {
    let mut items = Vec::with_capacity(tree.len() + 2);
    items.push(NavNode::home());
    items.extend(tree);
    if config.changelog {
        ensure_changelog(&mut items, previous);
    }
    items
}

/// Append a changelog entry unless one is already at the top level.
///
/// The previous document's entry is reused when it has one, so edits to its
/// text or icon survive regeneration.
pub fn ensure_changelog(items: &mut Vec<NavNode>, previous: Option<&SidebarDocument>) {
    if items.iter().any(|n| n.link == CHANGELOG_LINK) {
        return;
    }
    let entry = previous
        .and_then(SidebarDocument::changelog_entry)
        .cloned()
        .unwrap_or_else(NavNode::changelog);
    items.push(entry);
}
