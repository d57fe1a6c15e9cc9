//! Content directory scanning.
//!
//! Walks a documentation tree and turns it into an ordered list of
//! [`NavNode`]s. Each directory is built by a call that returns its own
//! child list; the caller attaches it to the folder node, so nothing is
//! threaded through the recursion except the skipped-entry log.
//!
//! ## Directory Structure
//!
//! ```text
//! content/
//! ├── index.md                 # Dropped: home is always the built-in "/" entry
//! ├── about.md                 # → About  /about
//! ├── notes.txt                # Dropped: extension not accepted
//! ├── assets/                  # Dropped: excluded name
//! ├── guide/                   # → Guide  /guide/index  (has an index file)
//! │   ├── index.md             #   represented by the folder itself
//! │   ├── install.md           #   → Install  /guide/install
//! │   └── advanced/            #   → Advanced /guide/advanced
//! │       └── tuning.md        #       → Tuning /guide/advanced/tuning
//! └── empty/                   # Dropped: no pages, no index file
//! ```
//!
//! ## Rules
//!
//! - Hidden entries (leading `.`) and names in `exclude_names` are skipped.
//! - Files are kept only when their extension is in `file_extensions`.
//! - Index files (`index`, `_index`, `readme`) never get their own node.
//!   A folder containing one links to `/<folder>/index` whichever of the
//!   three it is, and is kept even when it has no other children.
//! - A directory whose name ends in an accepted extension (`notes.md/`)
//!   is skipped, since its link would look like a page file.
//! - A folder with no children and no index file is dropped, or given a
//!   single "Overview" child under [`EmptyFolderPolicy::Overview`].
//! - Siblings are sorted by display text on every scan.
//!
//! ## Failures
//!
//! Only the content root is structural: a missing or unreadable root fails
//! the scan. Anything that goes wrong below it (permissions, broken
//! symlinks, symlink loops, duplicate links) is logged, recorded in
//! [`ScanOutcome::skipped`], and the entry is left out.

use crate::config::{EmptyFolderPolicy, SidebarConfig};
use crate::naming::{self, NodeKind};
use crate::types::NavNode;
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Content directory not found: {0}")]
    MissingSource(PathBuf),
    #[error("Cannot read content directory {path}: {source}")]
    UnreadableSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A single entry that was left out of the tree.
#[derive(Error, Debug)]
pub enum EntryError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0}: symlink loop")]
    SymlinkLoop(PathBuf),
    #[error("{0}: name is not valid UTF-8")]
    NonUtf8Name(PathBuf),
    #[error("{0}: directory name ends in a page extension")]
    ExtensionDirName(PathBuf),
    #[error("{path}: link {link} already in use")]
    DuplicateLink { path: PathBuf, link: String },
}

impl EntryError {
    pub fn path(&self) -> &Path {
        match self {
            EntryError::Io { path, .. } | EntryError::DuplicateLink { path, .. } => path,
            EntryError::SymlinkLoop(path)
            | EntryError::NonUtf8Name(path)
            | EntryError::ExtensionDirName(path) => path,
        }
    }
}

/// Result of scanning a content root.
#[derive(Debug, Default)]
pub struct ScanOutcome {
    /// Top-level nodes, sorted, without the built-in Home / Change Log entries.
    pub items: Vec<NavNode>,
    pub skipped: Vec<EntryError>,
}

/// Directory contents after exclusion and extension filtering.
#[derive(Debug, Default)]
struct Listing {
    dirs: Vec<String>,
    /// `(file name, stem)` of accepted non-index files.
    pages: Vec<(String, String)>,
    /// Whether the directory has an index file of any accepted kind.
    has_index: bool,
}

/// Scan `root` into a navigation tree.
pub fn scan(root: &Path, config: &SidebarConfig) -> Result<ScanOutcome, ScanError> {
    if !root.exists() {
        return Err(ScanError::MissingSource(root.to_path_buf()));
    }
    let unreadable = |source| ScanError::UnreadableSource {
        path: root.to_path_buf(),
        source,
    };
    let canonical_root = fs::canonicalize(root).map_err(unreadable)?;

    let mut walker = Walker {
        config,
        skipped: Vec::new(),
        ancestors: vec![canonical_root],
    };
    let listing = walker.list_dir(root).map_err(unreadable)?;
    if listing.has_index {
        tracing::debug!("ignoring top-level index file, home is built in");
    }
    let items = walker.children(root, "", listing, None);

    Ok(ScanOutcome {
        items,
        skipped: walker.skipped,
    })
}

struct Walker<'a> {
    config: &'a SidebarConfig,
    skipped: Vec<EntryError>,
    /// Canonical paths of the directories currently being descended.
    ancestors: Vec<PathBuf>,
}

impl Walker<'_> {
    fn skip(&mut self, error: EntryError) {
        tracing::warn!(path = %error.path().display(), error = %error, "skipping entry");
        self.skipped.push(error);
    }

    fn list_dir(&mut self, dir: &Path) -> io::Result<Listing> {
        let mut listing = Listing::default();

        for entry in fs::read_dir(dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(source) => {
                    self.skip(EntryError::Io {
                        path: dir.to_path_buf(),
                        source,
                    });
                    continue;
                }
            };
            let path = entry.path();
            let Ok(name) = entry.file_name().into_string() else {
                self.skip(EntryError::NonUtf8Name(path));
                continue;
            };
            if naming::is_excluded(&name, &self.config.exclude_names) {
                tracing::trace!(path = %path.display(), "excluded");
                continue;
            }
            // Follows symlinks, so a dangling link surfaces here.
            let metadata = match fs::metadata(&path) {
                Ok(m) => m,
                Err(source) => {
                    self.skip(EntryError::Io { path, source });
                    continue;
                }
            };

            if metadata.is_dir() {
                if naming::accepted_stem(&name, &self.config.file_extensions).is_some() {
                    self.skip(EntryError::ExtensionDirName(path));
                    continue;
                }
                listing.dirs.push(name);
            } else if metadata.is_file() {
                let Some(stem) = naming::accepted_stem(&name, &self.config.file_extensions) else {
                    tracing::trace!(path = %path.display(), "extension not accepted");
                    continue;
                };
                if naming::is_index_stem(stem) {
                    listing.has_index = true;
                } else {
                    let stem = stem.to_string();
                    listing.pages.push((name, stem));
                }
            }
        }

        listing.dirs.sort();
        listing.pages.sort();
        Ok(listing)
    }

    /// Build the sorted child list of `dir`, whose link path is `rel`.
    ///
    /// `own_link` is the folder's link, reserved so that a child named like
    /// the index page cannot take it.
    fn children(
        &mut self,
        dir: &Path,
        rel: &str,
        listing: Listing,
        own_link: Option<&str>,
    ) -> Vec<NavNode> {
        let mut nodes: Vec<NavNode> = Vec::new();
        let mut links: HashSet<String> = own_link.into_iter().map(String::from).collect();

        for name in listing.dirs {
            let path = dir.join(&name);
            let Some(node) = self.folder(&path, &join(rel, &name), &name) else {
                continue;
            };
            self.push_unique(&mut nodes, &mut links, node, path);
        }

        for (file_name, stem) in listing.pages {
            let node = NavNode::leaf(
                naming::format_name(&stem, &self.config.name_overrides),
                format!("/{}", join(rel, &stem)),
                naming::resolve_icon(&stem, NodeKind::File, self.config),
            );
            self.push_unique(&mut nodes, &mut links, node, dir.join(file_name));
        }

        nodes.sort_by(|a, b| naming::compare_text(&a.text, &b.text).then_with(|| a.link.cmp(&b.link)));
        nodes
    }

    fn push_unique(
        &mut self,
        nodes: &mut Vec<NavNode>,
        links: &mut HashSet<String>,
        node: NavNode,
        path: PathBuf,
    ) {
        if links.insert(node.link.clone()) {
            nodes.push(node);
        } else {
            self.skip(EntryError::DuplicateLink {
                path,
                link: node.link,
            });
        }
    }

    /// Build the node for a subdirectory, or `None` if it is dropped.
    fn folder(&mut self, path: &Path, rel: &str, name: &str) -> Option<NavNode> {
        let canonical = match fs::canonicalize(path) {
            Ok(c) => c,
            Err(source) => {
                self.skip(EntryError::Io {
                    path: path.to_path_buf(),
                    source,
                });
                return None;
            }
        };
        if self.ancestors.contains(&canonical) {
            self.skip(EntryError::SymlinkLoop(path.to_path_buf()));
            return None;
        }

        // An unreadable directory counts as empty.
        let listing = match self.list_dir(path) {
            Ok(listing) => listing,
            Err(source) => {
                self.skip(EntryError::Io {
                    path: path.to_path_buf(),
                    source,
                });
                Listing::default()
            }
        };
        let has_index = listing.has_index;
        let link = if has_index {
            format!("/{rel}/index")
        } else {
            format!("/{rel}")
        };

        self.ancestors.push(canonical);
        let mut children = self.children(path, rel, listing, Some(&link));
        self.ancestors.pop();

        if children.is_empty() && !has_index {
            match self.config.empty_folders {
                EmptyFolderPolicy::Drop => {
                    tracing::debug!(path = %path.display(), "dropping empty folder");
                    return None;
                }
                EmptyFolderPolicy::Overview => {
                    children.push(NavNode::leaf(
                        "Overview",
                        format!("/{rel}/_index"),
                        "folder-open",
                    ));
                }
            }
        }

        Some(NavNode {
            text: naming::format_name(name, &self.config.name_overrides),
            link,
            icon: naming::resolve_icon(name, NodeKind::Folder, self.config),
            children,
        })
    }
}

fn join(rel: &str, name: &str) -> String {
    if rel.is_empty() {
        name.to_string()
    } else {
        format!("{rel}/{name}")
    }
}
