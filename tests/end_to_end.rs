use proptest::prelude::*;
use sidebargen::config::SidebarConfig;
use sidebargen::document;
use sidebargen::generate::generate;
use sidebargen::naming::compare_text;
use sidebargen::types::{NavNode, SidebarDocument};
use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, "# page\n").unwrap();
}

fn config_in(out: &TempDir) -> SidebarConfig {
    SidebarConfig {
        output: out.path().join("templates/default/sidebar.json"),
        ..SidebarConfig::default()
    }
}

fn all_nodes(doc: &SidebarDocument) -> Vec<&NavNode> {
    doc.items.iter().flat_map(NavNode::walk).collect()
}

fn assert_sorted(nodes: &[NavNode]) {
    for pair in nodes.windows(2) {
        assert_ne!(
            compare_text(&pair[0].text, &pair[1].text),
            Ordering::Greater,
            "{:?} sorted after {:?}",
            pair[0].text,
            pair[1].text
        );
    }
    for node in nodes {
        assert_sorted(&node.children);
    }
}

#[test]
fn example_content_tree() {
    let content = TempDir::new().unwrap();
    write(content.path(), "about.md");
    write(content.path(), "guide/index.md");
    write(content.path(), "guide/install.md");
    let out = TempDir::new().unwrap();

    let doc = generate(content.path(), &config_in(&out)).unwrap();

    let texts: Vec<&str> = doc.items.iter().map(|n| n.text.as_str()).collect();
    assert_eq!(texts, vec!["Home", "About", "Guide", "Change Log"]);

    let guide = &doc.items[2];
    assert_eq!(guide.link, "/guide/index");
    assert_eq!(
        guide.children,
        vec![NavNode::leaf("Install", "/guide/install", "file")]
    );
    assert_eq!(doc.items, doc.menu);
}

#[test]
fn written_json_matches_consumer_contract() {
    let content = TempDir::new().unwrap();
    write(content.path(), "about.md");
    write(content.path(), "guide/index.md");
    write(content.path(), "guide/install.md");
    let out = TempDir::new().unwrap();
    let config = config_in(&out);

    generate(content.path(), &config).unwrap();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&config.output).unwrap()).unwrap();
    assert_eq!(raw["title"], "Documentation Navigation");
    assert_eq!(raw["items"], raw["menu"]);
    assert!(raw["generatedAt"].as_str().unwrap().contains('T'));
    assert!(raw["items"][1].get("items").is_none());
    assert_eq!(raw["items"][2]["items"][0]["link"], "/guide/install");
}

#[test]
fn index_collapsing() {
    let content = TempDir::new().unwrap();
    write(content.path(), "docs/index.md");
    write(content.path(), "docs/guide.md");
    let out = TempDir::new().unwrap();

    let doc = generate(content.path(), &config_in(&out)).unwrap();

    let docs: Vec<&NavNode> = all_nodes(&doc)
        .into_iter()
        .filter(|n| n.link.starts_with("/docs") && n.children.len() == 1)
        .collect();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].link, "/docs/index");
    assert_eq!(docs[0].children[0].link, "/docs/guide");
    assert!(all_nodes(&doc).iter().all(|n| n.text != "Index"));
}

#[test]
fn empty_folder_dropped() {
    let content = TempDir::new().unwrap();
    fs::create_dir_all(content.path().join("docs/empty")).unwrap();
    write(content.path(), "docs/page.md");
    let out = TempDir::new().unwrap();

    let doc = generate(content.path(), &config_in(&out)).unwrap();

    assert!(all_nodes(&doc).iter().all(|n| !n.link.contains("empty")));
}

#[test]
fn extension_filtering() {
    let content = TempDir::new().unwrap();
    write(content.path(), "notes.txt");
    write(content.path(), "page.html");
    let out = TempDir::new().unwrap();

    let doc = generate(content.path(), &config_in(&out)).unwrap();

    assert!(all_nodes(&doc).iter().all(|n| !n.link.contains("notes")));
    assert!(all_nodes(&doc).iter().any(|n| n.link == "/page"));
}

#[test]
fn changelog_idempotence() {
    let content = TempDir::new().unwrap();
    write(content.path(), "about.md");
    let out = TempDir::new().unwrap();
    let config = config_in(&out);

    for _ in 0..3 {
        generate(content.path(), &config).unwrap();
    }
    let doc = document::read_document(&config.output).unwrap().unwrap();

    let count = doc.items.iter().filter(|n| n.link == "/changelog").count();
    assert_eq!(count, 1);
}

#[test]
fn determinism_ignoring_timestamp() {
    let content = TempDir::new().unwrap();
    for rel in ["b.md", "A.md", "c/index.md", "c/z.md", "c/y/deep.html", "_x/hidden.md"] {
        write(content.path(), rel);
    }
    let out = TempDir::new().unwrap();
    let config = config_in(&out);

    let first = generate(content.path(), &config).unwrap();
    let second = generate(content.path(), &config).unwrap();

    assert_eq!(
        serde_json::to_vec(&first.items).unwrap(),
        serde_json::to_vec(&second.items).unwrap()
    );
    assert_eq!(
        serde_json::to_vec(&first.menu).unwrap(),
        serde_json::to_vec(&second.menu).unwrap()
    );
}

fn name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z][a-z_-]{0,6}",
        Just("assets".to_string()),
        Just(".hidden".to_string()),
        Just("index".to_string()),
        Just("README".to_string()),
    ]
}

fn file_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z][a-z_-]{0,6}".prop_filter("excluded name", |s| s != "assets"),
        Just(".hidden".to_string()),
        Just("index".to_string()),
        Just("README".to_string()),
    ]
}

fn rel_path_strategy() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(name_strategy(), 0..3),
        file_name_strategy(),
        prop_oneof![Just(".md"), Just(".html"), Just(".txt")],
    )
        .prop_map(|(dirs, file, ext)| {
            let mut parts = dirs;
            parts.push(format!("{file}{ext}"));
            parts.join("/")
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn generated_trees_are_sorted_and_filtered(paths in prop::collection::vec(rel_path_strategy(), 1..12)) {
        let content = TempDir::new().unwrap();
        for rel in &paths {
            let path = content.path().join(rel);
            let Some(parent) = path.parent() else { continue };
            // Generated names can clash with an earlier file or directory.
            if fs::create_dir_all(parent).is_err() || path.exists() {
                continue;
            }
            fs::write(&path, "x").unwrap();
        }
        let out = TempDir::new().unwrap();
        let config = config_in(&out);

        let doc = generate(content.path(), &config).unwrap();

        // Home and Change Log are pinned; everything between is sorted.
        let body = &doc.items[1..doc.items.len() - 1];
        assert_sorted(body);

        let mut seen = std::collections::HashSet::new();
        for node in all_nodes(&doc) {
            prop_assert!(seen.insert(node.link.clone()), "duplicate link {}", node.link);
            prop_assert!(node.link.starts_with('/'));
            prop_assert!(!node.link.ends_with(".md") && !node.link.ends_with(".html"));
            for segment in node.link.split('/').filter(|s| !s.is_empty()) {
                prop_assert!(!segment.starts_with('.'), "hidden segment in {}", node.link);
                prop_assert!(!config.exclude_names.contains(segment), "excluded segment in {}", node.link);
            }
        }
    }
}
