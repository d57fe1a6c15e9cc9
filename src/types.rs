//! Serialized navigation types.
//!
//! These are written to the sidebar document and read back by the page
//! renderer, the incremental editor, and the next generation run, so the
//! field names here are the on-disk format.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const HOME_LINK: &str = "/";
pub const CHANGELOG_LINK: &str = "/changelog";

/// One entry in the navigation tree (a file or a folder).
///
/// `link` always starts with `/` and never carries a file extension.
/// Leaf nodes omit `items` when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavNode {
    pub text: String,
    pub link: String,
    pub icon: String,
    #[serde(rename = "items", default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavNode>,
}

impl NavNode {
    pub fn leaf(text: impl Into<String>, link: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: link.into(),
            icon: icon.into(),
            children: Vec::new(),
        }
    }

    /// The built-in first entry; never derived from the filesystem.
    pub fn home() -> Self {
        Self::leaf("Home", HOME_LINK, "home")
    }

    pub fn changelog() -> Self {
        Self::leaf("Change Log", CHANGELOG_LINK, "history")
    }

    /// Depth-first pre-order walk over this node and its descendants.
    pub fn walk(&self) -> impl Iterator<Item = &NavNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

/// The persisted sidebar artifact.
///
/// `items` and `menu` are kept identical; older templates read `menu`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarDocument {
    pub title: String,
    #[serde(default)]
    pub items: Vec<NavNode>,
    #[serde(default)]
    pub menu: Vec<NavNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
}

impl SidebarDocument {
    /// Empty document with only the title set.
    pub fn empty(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            items: Vec::new(),
            menu: Vec::new(),
            generated_at: None,
        }
    }

    /// Build a document whose `items` and `menu` are both `items`.
    pub fn new(title: impl Into<String>, items: Vec<NavNode>, generated_at: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            menu: items.clone(),
            items,
            generated_at: Some(generated_at),
        }
    }

    /// Top-level entries, preferring `items` and falling back to `menu`.
    pub fn top_level(&self) -> &[NavNode] {
        if self.items.is_empty() {
            &self.menu
        } else {
            &self.items
        }
    }

    /// Every node in the document, depth-first.
    pub fn nodes(&self) -> impl Iterator<Item = &NavNode> {
        self.top_level().iter().flat_map(NavNode::walk)
    }

    /// Top-level changelog entry, if any.
    pub fn changelog_entry(&self) -> Option<&NavNode> {
        self.top_level().iter().find(|n| n.link == CHANGELOG_LINK)
    }
}
