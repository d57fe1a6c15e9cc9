//! Incremental sidebar edits.
//!
//! `add` creates one page or folder in the content tree and splices a
//! matching node into the existing document, without rescanning. Missing
//! parent folders are created both on disk and in the document; a parent
//! that is a page rather than a folder is refused. The touched
//! level is re-sorted and the changelog entry is kept in place, so a later
//! full regeneration produces the same shape (except that a still-empty
//! folder is dropped or given an Overview child, per `empty_folders`).

use crate::config::SidebarConfig;
use crate::document::{self, DocumentError};
use crate::generate::ensure_changelog;
use crate::naming::{self, NodeKind};
use crate::types::{CHANGELOG_LINK, HOME_LINK, NavNode, SidebarDocument};
use chrono::Utc;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditError {
    #[error("Invalid entry name: {0:?}")]
    InvalidName(String),
    #[error("Already exists: {0}")]
    AlreadyExists(PathBuf),
    #[error("Parent is a page, not a folder: {0}")]
    ParentIsPage(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Create `name` under `parent` in the content tree and add it to the sidebar.
///
/// `parent` is a slash-separated path of raw folder names, empty for the top
/// level. A page name without an accepted extension gets `.md`.
pub fn add_entry(
    content_root: &Path,
    name: &str,
    kind: NodeKind,
    parent: &str,
    config: &SidebarConfig,
) -> Result<SidebarDocument, EditError> {
    let segments = parent_segments(parent, config)?;
    validate_name(name, config)?;
    if kind == NodeKind::Folder && naming::accepted_stem(name, &config.file_extensions).is_some() {
        return Err(EditError::InvalidName(name.to_string()));
    }

    let mut dir = content_root.to_path_buf();
    for segment in &segments {
        if !dir.join(segment).is_dir() {
            if let Some(page) = page_file(&dir, segment, config) {
                return Err(EditError::ParentIsPage(page.display().to_string()));
            }
        }
        dir.push(segment);
    }
    let target = match kind {
        NodeKind::Folder => dir.join(name),
        NodeKind::File if naming::accepted_stem(name, &config.file_extensions).is_some() => {
            dir.join(name)
        }
        NodeKind::File => dir.join(format!("{name}.md")),
    };
    if target.exists() {
        return Err(EditError::AlreadyExists(target));
    }

    match kind {
        NodeKind::Folder => fs::create_dir_all(&target)?,
        NodeKind::File => {
            fs::create_dir_all(&dir)?;
            let stem = page_stem(name, config);
            let heading = naming::format_name(stem, &config.name_overrides);
            fs::write(&target, format!("# {heading}\n"))?;
        }
    }
    tracing::info!(path = %target.display(), "created content entry");

    // Every parent is a directory on disk now, so a childless node at a
    // parent link is an empty folder rather than a page.
    let mut doc = document::load_or_default(&config.output, &config.title);
    splice(&mut doc, name, kind, &segments, config, true)?;
    document::write_document(&config.output, &doc)?;
    Ok(doc)
}

/// Splice a node for `name` into `doc` below the folder path `parents`.
///
/// A parent matches a folder node: one with children, or one linking to
/// its index page. A childless node at `/<parent>` is a page and fails
/// with [`EditError::ParentIsPage`]. Adding a link that is already present
/// leaves the document unchanged.
pub fn insert_entry(
    doc: &mut SidebarDocument,
    name: &str,
    kind: NodeKind,
    parents: &[String],
    config: &SidebarConfig,
) -> Result<(), EditError> {
    splice(doc, name, kind, parents, config, false)
}

fn splice(
    doc: &mut SidebarDocument,
    name: &str,
    kind: NodeKind,
    parents: &[String],
    config: &SidebarConfig,
    childless_are_folders: bool,
) -> Result<(), EditError> {
    if let Some(link) = page_parent(doc.top_level(), parents, childless_are_folders) {
        return Err(EditError::ParentIsPage(link));
    }

    let mut items = if doc.items.is_empty() {
        std::mem::take(&mut doc.menu)
    } else {
        std::mem::take(&mut doc.items)
    };
    if items.is_empty() {
        items.push(NavNode::home());
    }
    let changelog = items
        .iter()
        .position(|n| n.link == CHANGELOG_LINK)
        .map(|pos| items.remove(pos));

    let mut level = &mut items;
    let mut prefix = String::new();
    for part in parents {
        prefix = if prefix.is_empty() {
            part.clone()
        } else {
            format!("{prefix}/{part}")
        };
        let pos = match level
            .iter()
            .position(|n| is_folder_node(n, &prefix, childless_are_folders))
        {
            Some(pos) => pos,
            None => {
                level.push(NavNode::leaf(
                    naming::format_name(part, &config.name_overrides),
                    format!("/{prefix}"),
                    naming::resolve_icon(part, NodeKind::Folder, config),
                ));
                level.len() - 1
            }
        };
        level = &mut level[pos].children;
    }

    let stem = match kind {
        NodeKind::Folder => name,
        NodeKind::File => page_stem(name, config),
    };
    let link = if prefix.is_empty() {
        format!("/{stem}")
    } else {
        format!("/{prefix}/{stem}")
    };

    if level.iter().any(|n| n.link == link) {
        tracing::debug!(link = %link, "entry already in sidebar");
    } else {
        level.push(NavNode::leaf(
            naming::format_name(stem, &config.name_overrides),
            link,
            naming::resolve_icon(stem, kind, config),
        ));
    }

    let start = usize::from(items.first().is_some_and(|n| n.link == HOME_LINK));
    sort_tree(&mut items[start..], parents.len());
    match changelog {
        Some(entry) => items.push(entry),
        None if config.changelog => ensure_changelog(&mut items, None),
        None => {}
    }

    doc.menu = items.clone();
    doc.items = items;
    doc.generated_at = Some(Utc::now());
    Ok(())
}

/// Link of the first parent that resolves to a page node, if any.
fn page_parent(mut level: &[NavNode], parents: &[String], childless_are_folders: bool) -> Option<String> {
    let mut prefix = String::new();
    for part in parents {
        prefix = if prefix.is_empty() {
            part.clone()
        } else {
            format!("{prefix}/{part}")
        };
        if let Some(node) = level.iter().find(|n| is_folder_node(n, &prefix, childless_are_folders)) {
            level = &node.children;
            continue;
        }
        let bare = format!("/{prefix}");
        return level.iter().any(|n| n.link == bare).then_some(bare);
    }
    None
}

/// Sort `nodes` and their descendants down to `depth` levels below.
fn sort_tree(nodes: &mut [NavNode], depth: usize) {
    nodes.sort_by(|a, b| naming::compare_text(&a.text, &b.text).then_with(|| a.link.cmp(&b.link)));
    if depth > 0 {
        for node in nodes {
            sort_tree(&mut node.children, depth - 1);
        }
    }
}

/// Whether `node` is the folder at `prefix`: linked as `/prefix/index`, or
/// as `/prefix` when it has children.
fn is_folder_node(node: &NavNode, prefix: &str, childless_are_folders: bool) -> bool {
    let Some(rest) = node.link.strip_prefix('/').and_then(|l| l.strip_prefix(prefix)) else {
        return false;
    };
    match rest {
        "/index" => true,
        "" => childless_are_folders || !node.children.is_empty(),
        _ => false,
    }
}

/// An accepted page file in `dir` whose stem is `stem`.
fn page_file(dir: &Path, stem: &str, config: &SidebarConfig) -> Option<PathBuf> {
    config
        .file_extensions
        .iter()
        .map(|ext| dir.join(format!("{stem}{ext}")))
        .find(|path| path.is_file())
}

fn page_stem<'a>(name: &'a str, config: &SidebarConfig) -> &'a str {
    naming::accepted_stem(name, &config.file_extensions).unwrap_or(name)
}

fn validate_name(name: &str, config: &SidebarConfig) -> Result<(), EditError> {
    let invalid = name.trim().is_empty()
        || name.contains(['/', '\\'])
        || name == ".."
        || naming::is_excluded(name, &config.exclude_names)
        || naming::is_index_stem(page_stem(name, config));
    if invalid {
        return Err(EditError::InvalidName(name.to_string()));
    }
    Ok(())
}

fn parent_segments(parent: &str, config: &SidebarConfig) -> Result<Vec<String>, EditError> {
    parent
        .split('/')
        .filter(|s| !s.is_empty())
        .map(|s| {
            validate_name(s, config)?;
            Ok(s.to_string())
        })
        .collect()
}
