//! Shared test utilities.
//!
//! Fixture setup plus lookups and shape assertions over `NavNode` trees.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let outcome = scan(tmp.path(), &SidebarConfig::default()).unwrap();
//!
//! assert_nav_shape(&outcome.items, &[
//!     ("About", &[]),
//!     ("Guide", &["Advanced", "Install"]),
//! ]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::types::NavNode;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Node lookups
// =========================================================================

/// Display texts of a sibling list, in order.
pub fn texts(nodes: &[NavNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.text.as_str()).collect()
}

/// Links of a sibling list, in order.
pub fn links(nodes: &[NavNode]) -> Vec<&str> {
    nodes.iter().map(|n| n.link.as_str()).collect()
}

/// Find a node by text anywhere in the tree. Panics if not found.
pub fn find_node<'a>(nodes: &'a [NavNode], text: &str) -> &'a NavNode {
    nodes
        .iter()
        .flat_map(NavNode::walk)
        .find(|n| n.text == text)
        .unwrap_or_else(|| {
            let all: Vec<&str> = nodes.iter().flat_map(NavNode::walk).map(|n| n.text.as_str()).collect();
            panic!("node '{text}' not found. Available: {all:?}")
        })
}

/// Child texts under a top-level node. Panics if the parent is missing.
pub fn children_texts<'a>(nodes: &'a [NavNode], parent: &str) -> Vec<&'a str> {
    nodes
        .iter()
        .find(|n| n.text == parent)
        .map(|n| texts(&n.children))
        .unwrap_or_else(|| panic!("node '{parent}' not found. Available: {:?}", texts(nodes)))
}

/// Assert the top two levels of a tree match `expected`.
///
/// Each entry is `(text, child texts)`. Use `&[]` for leaves.
pub fn assert_nav_shape(nodes: &[NavNode], expected: &[(&str, &[&str])]) {
    let expected_texts: Vec<&str> = expected.iter().map(|(t, _)| *t).collect();
    assert_eq!(texts(nodes), expected_texts, "top-level texts mismatch");

    for (text, children) in expected {
        assert_eq!(
            children_texts(nodes, text),
            children.to_vec(),
            "children of '{text}' mismatch"
        );
    }
}
