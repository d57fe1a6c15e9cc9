//! Sidebar configuration.
//!
//! Handles loading, validating, and merging `sidebar.toml`. Stock defaults
//! cover a typical documentation tree; a user file only needs the keys it
//! wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! title = "Documentation Navigation"
//! output = "templates/default/sidebar.json"
//! exclude_names = ["_partials", "components", "includes", "assets", ".DS_Store"]
//! file_extensions = [".md", ".html"]
//! default_folder_icon = "folder"
//! default_file_icon = "file"
//! overwrite_existing = true     # false: refuse to replace an existing sidebar
//! allow_missing_source = false  # true: missing content root yields an empty tree
//! empty_folders = "drop"        # or "overview"
//! changelog = true              # append the "Change Log" entry
//!
//! [icon_map]
//! about = "info-circle"
//! docs = "book"
//!
//! [name_overrides]
//! readme = "Read Me"
//! ```
//!
//! ## Partial Configuration
//!
//! Tables merge key by key, so adding one icon keeps the stock ones:
//!
//! ```toml
//! [icon_map]
//! tutorials = "graduation-cap"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE: &str = "sidebar.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// What to do with a directory that ends up with no children and no index file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyFolderPolicy {
    /// Drop the directory and its whole subtree.
    #[default]
    Drop,
    /// Keep the directory with a single "Overview" child linking to it.
    Overview,
}

/// Sidebar generation settings.
///
/// Passed explicitly into every generation call; nothing reads global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SidebarConfig {
    /// Document title written to the sidebar.
    pub title: String,
    /// Where the generated sidebar document is written.
    pub output: PathBuf,
    /// Raw entry names skipped at every level.
    pub exclude_names: BTreeSet<String>,
    /// Raw name → icon, matched case-insensitively.
    pub icon_map: BTreeMap<String, String>,
    pub default_folder_icon: String,
    pub default_file_icon: String,
    /// Raw name → display text, matched exactly.
    pub name_overrides: BTreeMap<String, String>,
    /// Accepted file extensions, with leading dot.
    pub file_extensions: BTreeSet<String>,
    /// Replace an existing sidebar document at `output`.
    pub overwrite_existing: bool,
    /// Treat a missing content root as an empty tree instead of an error.
    pub allow_missing_source: bool,
    pub empty_folders: EmptyFolderPolicy,
    /// Append the "Change Log" entry when the tree has none.
    pub changelog: bool,
}

fn strings(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn pairs(items: &[(&str, &str)]) -> BTreeMap<String, String> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

impl Default for SidebarConfig {
    fn default() -> Self {
        Self {
            title: "Documentation Navigation".to_string(),
            output: PathBuf::from("templates/default/sidebar.json"),
            exclude_names: strings(&["_partials", "components", "includes", "assets", ".DS_Store"]),
            icon_map: pairs(&[
                ("home", "home"),
                ("about", "info-circle"),
                ("blog", "newspaper"),
                ("contact", "envelope"),
                ("products", "box"),
                ("services", "server"),
                ("docs", "book"),
                ("pages", "file-alt"),
                ("index", "home"),
                ("readme", "info-circle"),
                ("license", "file-contract"),
                ("changelog", "history"),
                ("_index", "folder"),
            ]),
            default_folder_icon: "folder".to_string(),
            default_file_icon: "file".to_string(),
            name_overrides: pairs(&[
                ("_index", "Overview"),
                ("index", "Home"),
                ("readme", "Read Me"),
            ]),
            file_extensions: strings(&[".md", ".html"]),
            overwrite_existing: true,
            allow_missing_source: false,
            empty_folders: EmptyFolderPolicy::Drop,
            changelog: true,
        }
    }
}

impl SidebarConfig {
    /// Validate values that serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("title must not be empty".into()));
        }
        if self.default_folder_icon.is_empty() || self.default_file_icon.is_empty() {
            return Err(ConfigError::Validation(
                "default_folder_icon and default_file_icon must not be empty".into(),
            ));
        }
        if self.file_extensions.is_empty() {
            return Err(ConfigError::Validation(
                "file_extensions must not be empty".into(),
            ));
        }
        if let Some(bad) = self
            .file_extensions
            .iter()
            .find(|e| !e.starts_with('.') || e.len() < 2)
        {
            return Err(ConfigError::Validation(format!(
                "file_extensions entries must look like \".md\", got {bad:?}"
            )));
        }
        if self.output.as_os_str().is_empty() {
            return Err(ConfigError::Validation("output must not be empty".into()));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Stock defaults as a TOML table, the base layer for user overrides.
pub fn stock_defaults_value() -> toml::Value {
    // Every field of SidebarConfig is a string, bool, path, set or string map,
    // all of which have a TOML representation.
    toml::Value::try_from(SidebarConfig::default())
        .unwrap_or_else(|_| toml::Value::Table(toml::map::Map::new()))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SidebarConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SidebarConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults when it is absent.
pub fn load_config(path: &Path) -> Result<SidebarConfig, ConfigError> {
    let overlay = load_raw_config(path)?;
    if overlay.is_some() {
        tracing::debug!(path = %path.display(), "loaded sidebar config");
    }
    resolve_config(stock_defaults_value(), overlay)
}

/// Fully commented stock `sidebar.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Sidebar Generator Configuration
# ===============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Tables merge with the defaults key
# by key; unknown keys cause an error.

# Title written to the sidebar document.
title = "Documentation Navigation"

# Where the sidebar document is written (parent directories are created).
output = "templates/default/sidebar.json"

# Entry names skipped at every level. Names starting with "." are always skipped.
exclude_names = ["_partials", "components", "includes", "assets", ".DS_Store"]

# Files with other extensions never appear in the sidebar.
file_extensions = [".md", ".html"]

# Icons used when a name has no entry in [icon_map].
default_folder_icon = "folder"
default_file_icon = "file"

# Set to false to refuse replacing an existing sidebar document.
overwrite_existing = true

# Set to true to write a sidebar with only Home/Change Log when the content
# directory is missing, instead of failing.
allow_missing_source = false

# Folders with no pages and no index file:
#   "drop"     - leave them out of the sidebar
#   "overview" - keep them with a single "Overview" child
empty_folders = "drop"

# Append a "Change Log" entry linking to /changelog when none exists.
changelog = true

# ---------------------------------------------------------------------------
# Icons by raw file or folder name (case-insensitive)
# ---------------------------------------------------------------------------
[icon_map]
home = "home"
about = "info-circle"
blog = "newspaper"
contact = "envelope"
products = "box"
services = "server"
docs = "book"
pages = "file-alt"
index = "home"
readme = "info-circle"
license = "file-contract"
changelog = "history"
_index = "folder"

# ---------------------------------------------------------------------------
# Display text by raw name (exact match), instead of Title Case
# ---------------------------------------------------------------------------
[name_overrides]
_index = "Overview"
index = "Home"
readme = "Read Me"
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_has_stock_values() {
        let config = SidebarConfig::default();
        assert_eq!(config.title, "Documentation Navigation");
        assert_eq!(config.default_file_icon, "file");
        assert_eq!(config.default_folder_icon, "folder");
        assert!(config.file_extensions.contains(".md"));
        assert!(config.file_extensions.contains(".html"));
        assert_eq!(config.empty_folders, EmptyFolderPolicy::Drop);
        assert!(config.overwrite_existing);
        assert!(!config.allow_missing_source);
    }

    #[test]
    fn default_config_validates() {
        SidebarConfig::default().validate().unwrap();
    }

    #[test]
    fn parse_partial_config() {
        let config: SidebarConfig = toml::from_str(r#"title = "My Docs""#).unwrap();
        assert_eq!(config.title, "My Docs");
        assert_eq!(config.default_file_icon, "file");
    }

    #[test]
    fn parse_empty_folder_policy() {
        let config: SidebarConfig = toml::from_str(r#"empty_folders = "overview""#).unwrap();
        assert_eq!(config.empty_folders, EmptyFolderPolicy::Overview);
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<SidebarConfig, _> = toml::from_str("titel = \"typo\"");
        assert!(result.is_err());
    }

    #[test]
    fn merge_keeps_stock_icons_when_adding_one() {
        let overlay: toml::Value = toml::from_str(
            r#"
[icon_map]
tutorials = "graduation-cap"
"#,
        )
        .unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.icon_map["tutorials"], "graduation-cap");
        assert_eq!(config.icon_map["about"], "info-circle");
    }

    #[test]
    fn merge_replaces_arrays_wholesale() {
        let overlay: toml::Value = toml::from_str(r#"file_extensions = [".md"]"#).unwrap();
        let config = resolve_config(stock_defaults_value(), Some(overlay)).unwrap();
        assert_eq!(config.file_extensions.len(), 1);
    }

    #[test]
    fn validation_rejects_extension_without_dot() {
        let overlay: toml::Value = toml::from_str(r#"file_extensions = ["md"]"#).unwrap();
        let result = resolve_config(stock_defaults_value(), Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validation_rejects_empty_title() {
        let overlay: toml::Value = toml::from_str(r#"title = "  ""#).unwrap();
        let result = resolve_config(stock_defaults_value(), Some(overlay));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(&tmp.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config.title, "Documentation Navigation");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(
            &path,
            r#"
title = "Handbook"
output = "out/nav.json"
allow_missing_source = true

[name_overrides]
faq = "Questions"
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.title, "Handbook");
        assert_eq!(config.output, PathBuf::from("out/nav.json"));
        assert!(config.allow_missing_source);
        assert_eq!(config.name_overrides["faq"], "Questions");
        assert_eq!(config.name_overrides["readme"], "Read Me");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(&path, "title = [unclosed").unwrap();
        assert!(matches!(load_config(&path), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn stock_config_toml_parses_to_defaults() {
        let config: SidebarConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SidebarConfig::default();
        assert_eq!(config.title, defaults.title);
        assert_eq!(config.icon_map, defaults.icon_map);
        assert_eq!(config.name_overrides, defaults.name_overrides);
        assert_eq!(config.exclude_names, defaults.exclude_names);
        assert_eq!(config.file_extensions, defaults.file_extensions);
        assert_eq!(config.output, defaults.output);
    }
}
