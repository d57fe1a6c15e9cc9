//! Display names, icons, and file classification for navigation entries.
//!
//! Every node in the sidebar gets its label and icon from the raw file or
//! directory name. This module keeps those rules in one place so the
//! scanner, the incremental editor, and the tests agree on them.
//!
//! ## Display Text
//!
//! An exact match in the override table wins. Otherwise dashes and
//! underscores become spaces and every word starts with a capital:
//! - `getting-started` → "Getting Started"
//! - `api_reference` → "Api Reference"
//! - `FAQ` → "FAQ" (existing capitals are left alone)
//!
//! ## Icons
//!
//! The icon table is matched case-insensitively against the raw name
//! (`About.md` and `about.md` both map through `about`). Misses fall back
//! to the folder or file default.
//!
//! ## Index Files
//!
//! `index`, `_index` and `readme` (any case, any accepted extension) stand
//! for their containing folder rather than producing a sibling node.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::config::SidebarConfig;

/// Kind of navigation entry, used to pick the fallback icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Folder,
    File,
}

const INDEX_STEMS: &[&str] = &["index", "_index", "readme"];

/// Display text for a raw base name (extension already stripped).
///
/// Override keys are matched exactly and case-sensitively.
pub fn format_name(raw: &str, overrides: &BTreeMap<String, String>) -> String {
    if let Some(text) = overrides.get(raw) {
        return text.clone();
    }
    title_case(raw)
}

/// Separator normalisation plus per-word capitalisation.
///
/// A word is a run of alphanumeric characters; only its first character is
/// touched, so already-capitalised text comes back unchanged.
pub fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_word = false;
    for c in raw.chars() {
        let c = if c == '-' || c == '_' { ' ' } else { c };
        if c.is_alphanumeric() {
            if in_word {
                out.push(c);
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Icon for a raw base name: exact key first, then a case-insensitive scan
/// of the table, then the default for `kind`.
pub fn resolve_icon(name: &str, kind: NodeKind, config: &SidebarConfig) -> String {
    if let Some(icon) = config.icon_map.get(name) {
        return icon.clone();
    }
    let lowered = name.to_lowercase();
    config
        .icon_map
        .iter()
        .find(|(key, _)| key.to_lowercase() == lowered)
        .map(|(_, icon)| icon.clone())
        .unwrap_or_else(|| match kind {
            NodeKind::Folder => config.default_folder_icon.clone(),
            NodeKind::File => config.default_file_icon.clone(),
        })
}

/// Whether a base name designates the folder's own landing page.
pub fn is_index_stem(stem: &str) -> bool {
    let lowered = stem.to_lowercase();
    INDEX_STEMS.contains(&lowered.as_str())
}

/// Whether a hidden-file or exclusion rule removes this raw name.
pub fn is_excluded(name: &str, exclude_names: &BTreeSet<String>) -> bool {
    name.starts_with('.') || exclude_names.contains(name)
}

/// Return the base name of `file_name` if its extension is accepted.
///
/// Extensions are configured with their leading dot (`.md`) and compared
/// case-insensitively, so `Guide.MD` is accepted as `Guide`.
pub fn accepted_stem<'a>(file_name: &'a str, extensions: &BTreeSet<String>) -> Option<&'a str> {
    let path = Path::new(file_name);
    let ext = path.extension()?.to_str()?;
    let dotted = format!(".{}", ext.to_lowercase());
    if !extensions.iter().any(|e| e.to_lowercase() == dotted) {
        return None;
    }
    path.file_stem()?.to_str().filter(|stem| !stem.is_empty())
}

/// Sibling ordering for display text.
///
/// Case-insensitive first so `api` sorts next to `About`, with a byte-wise
/// tiebreak to keep the order total and deterministic.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
