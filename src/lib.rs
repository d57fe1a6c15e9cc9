//! # Sidebargen
//!
//! Navigation sidebar generator for Markdown/HTML documentation sites.
//! The content directory is the data source: folders become sections,
//! accepted files become pages, and index files give a folder its own page.
//!
//! # Pipeline
//!
//! ```text
//! content/  →  scan  →  NavNode tree  →  generate  →  sidebar.json
//!                                          ↑
//!                        previous sidebar.json (changelog entry only)
//! ```
//!
//! The output document carries the tree twice, as `items` and `menu`, for
//! templates written against either name. Every run is a full regeneration;
//! nothing but a user-edited "Change Log" entry survives from the previous
//! document.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks the content directory into a sorted `NavNode` tree, collecting skipped entries |
//! | [`generate`] | Wraps the tree with Home / Change Log and writes the document |
//! | [`edit`] | Adds a single page or folder to content and sidebar without rescanning |
//! | [`document`] | Loads the previous document and writes the new one atomically |
//! | [`config`] | `sidebar.toml` loading, merging over stock defaults, validation |
//! | [`naming`] | Display text, icons, index-file and extension rules |
//! | [`types`] | Serialized types (`NavNode`, `SidebarDocument`) |
//! | [`output`] | CLI formatting of the generated tree |
//!
//! # Design Decisions
//!
//! ## Owned Child Lists
//!
//! Each directory is built by a call that returns its children; the caller
//! decides whether the folder node is kept. Nothing mutates a parent's list
//! from inside the recursion, which keeps the keep-or-drop decision local
//! and the walker testable against a temp directory.
//!
//! ## Explicit Configuration
//!
//! All rules (exclusions, icons, name overrides, extensions) live in a
//! [`config::SidebarConfig`] value passed into every call. There is no
//! global state, so two generations with different configs can run side by
//! side as long as they write to different paths.
//!
//! ## Skip, Don't Fail
//!
//! Below the content root, a bad entry (permissions, dangling symlink,
//! symlink loop, duplicate link) is logged and left out. Only a missing
//! root, a refused overwrite, or a failed write fail the run.

pub mod config;
pub mod document;
pub mod edit;
pub mod generate;
pub mod naming;
pub mod output;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
