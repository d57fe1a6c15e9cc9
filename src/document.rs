//! Reading and writing the sidebar document.
//!
//! Writes go to a temporary sibling file that is renamed over the target,
//! so readers see either the previous document or the new one, never a
//! partial file. Two processes writing the same path still race; the last
//! rename wins.

use crate::types::SidebarDocument;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Cannot write sidebar {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Cannot read sidebar {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid sidebar JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read an existing document. `Ok(None)` when the file does not exist.
pub fn read_document(path: &Path) -> Result<Option<SidebarDocument>, DocumentError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(DocumentError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| DocumentError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Read the document at `path`, or an empty one titled `title`.
///
/// An unreadable or malformed file is logged and treated as absent; the
/// next write replaces it.
pub fn load_or_default(path: &Path, title: &str) -> SidebarDocument {
    match read_document(path) {
        Ok(Some(doc)) => doc,
        Ok(None) => SidebarDocument::empty(title),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring previous sidebar");
            SidebarDocument::empty(title)
        }
    }
}

/// Serialize `doc` as pretty JSON and atomically replace `path`.
///
/// Parent directories are created as needed.
pub fn write_document(path: &Path, doc: &SidebarDocument) -> Result<(), DocumentError> {
    let json = serde_json::to_string_pretty(doc)?;
    let write_err = |source| DocumentError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let tmp = temp_path(path);
    if let Err(e) = fs::write(&tmp, json.as_bytes()).and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(write_err(e));
    }

    tracing::info!(path = %path.display(), "wrote sidebar");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "sidebar.json".to_string());
    path.with_file_name(format!(".{name}.tmp"))
}
