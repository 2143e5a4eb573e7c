//! File-backed catalog store.
//!
//! Every project is a directory under the store root. Each entity collection
//! is one JSON array file inside it, rewritten whole on every change, and the
//! undo/redo stacks live under `history/`:
//!
//! ```text
//! <root>/<project>/actors.json
//! <root>/<project>/scenes.json
//! <root>/<project>/sections.json
//! <root>/<project>/items.json
//! <root>/<project>/takes.json
//! <root>/<project>/history/undo.json
//! <root>/<project>/history/redo.json
//! ```
//!
//! There is no locking: one writer per project is assumed.

use std::path::{Path, PathBuf};

use voxcat_core::error::CoreError;

pub mod cascade;
pub mod collection;
pub mod history;
pub mod models;
pub mod repositories;
pub mod restore;

/// Maximum length of a project directory name.
pub const MAX_PROJECT_NAME_LENGTH: usize = 64;

/// Errors raised by the file store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON in {}: {source}", .path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// True when the underlying file does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// The directory holding every project.
#[derive(Debug, Clone)]
pub struct StoreRoot {
    root: PathBuf,
}

impl StoreRoot {
    /// Open (creating if needed) the store root directory.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| StoreError::io(&root, e))?;
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Resolve the context for `name`.
    ///
    /// The project directory itself is created lazily on first write, so a
    /// never-written project simply reads as an empty catalog.
    pub fn project(&self, name: &str) -> Result<ProjectContext, CoreError> {
        validate_project_name(name)?;
        Ok(ProjectContext {
            name: name.to_string(),
            dir: self.root.join(name),
        })
    }
}

/// Explicit per-call project scope. Every repository and the snapshot
/// manager take one of these instead of consulting global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    name: String,
    dir: PathBuf,
}

impl ProjectContext {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Absolute path of a file relative to the project directory.
    pub fn file(&self, relative: &str) -> PathBuf {
        self.dir.join(relative)
    }
}

/// Project names become directory names: ASCII alphanumerics, `-` and `_`
/// only, not starting with `-`.
pub fn validate_project_name(name: &str) -> Result<(), CoreError> {
    if name.is_empty() {
        return Err(CoreError::NoProjectSelected);
    }
    if name.len() > MAX_PROJECT_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Project name must not exceed {MAX_PROJECT_NAME_LENGTH} characters"
        )));
    }
    let valid = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        && !name.starts_with('-');
    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid project name '{name}'. Use letters, digits, '-' and '_'"
        )))
    }
}

/// Verify the store root is a reachable directory.
pub async fn health_check(store: &StoreRoot) -> Result<(), StoreError> {
    let meta = tokio::fs::metadata(store.path())
        .await
        .map_err(|e| StoreError::io(store.path(), e))?;
    if meta.is_dir() {
        Ok(())
    } else {
        Err(StoreError::io(
            store.path(),
            std::io::Error::new(std::io::ErrorKind::Other, "store root is not a directory"),
        ))
    }
}
