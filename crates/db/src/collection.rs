//! Generic JSON record collections.
//!
//! A collection is a single JSON array file. Reads load the whole array,
//! writes replace the whole file (via a sibling `.tmp` file and a rename, so
//! a crash never leaves a half-written collection behind).

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use voxcat_core::types::EntityId;

use crate::{ProjectContext, StoreError};

/// A record stored in a per-project collection file.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// File name relative to the project directory.
    const FILE: &'static str;
    /// Entity name used in errors and logs.
    const ENTITY: &'static str;

    fn id(&self) -> EntityId;
}

/// Load a collection. A missing file is an error here; see [`load_or_empty`].
pub async fn load<T: Record>(ctx: &ProjectContext) -> Result<Vec<T>, StoreError> {
    read_json(&ctx.file(T::FILE)).await
}

/// Load a collection, treating a missing file as empty.
pub async fn load_or_empty<T: Record>(ctx: &ProjectContext) -> Result<Vec<T>, StoreError> {
    match load(ctx).await {
        Err(e) if e.is_not_found() => Ok(Vec::new()),
        other => other,
    }
}

/// Overwrite the whole collection.
pub async fn save_all<T: Record>(ctx: &ProjectContext, records: &[T]) -> Result<(), StoreError> {
    write_json(&ctx.file(T::FILE), records).await
}

/// Find one record by id.
pub async fn find<T: Record>(ctx: &ProjectContext, id: EntityId) -> Result<Option<T>, StoreError> {
    Ok(load_or_empty::<T>(ctx)
        .await?
        .into_iter()
        .find(|r| r.id() == id))
}

/// Append records to the end of the collection.
pub async fn append<T: Record>(ctx: &ProjectContext, new: &[T]) -> Result<(), StoreError> {
    let mut records = load_or_empty::<T>(ctx).await?;
    records.extend_from_slice(new);
    save_all(ctx, &records).await
}

/// Replace the record with the same id. Returns `false` if none matched.
pub async fn replace<T: Record>(ctx: &ProjectContext, record: &T) -> Result<bool, StoreError> {
    let mut records = load_or_empty::<T>(ctx).await?;
    let Some(slot) = records.iter_mut().find(|r| r.id() == record.id()) else {
        return Ok(false);
    };
    *slot = record.clone();
    save_all(ctx, &records).await?;
    Ok(true)
}

/// Remove every record matching `predicate`, returning the removed ones.
///
/// The file is left untouched when nothing matches.
pub async fn remove_where<T, F>(ctx: &ProjectContext, predicate: F) -> Result<Vec<T>, StoreError>
where
    T: Record,
    F: Fn(&T) -> bool + Send,
{
    let records = load_or_empty::<T>(ctx).await?;
    let (removed, kept): (Vec<T>, Vec<T>) = records.into_iter().partition(|r| predicate(r));
    if !removed.is_empty() {
        save_all(ctx, &kept).await?;
    }
    Ok(removed)
}

pub(crate) async fn read_json<V: DeserializeOwned>(path: &Path) -> Result<V, StoreError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| StoreError::io(path, e))?;
    serde_json::from_slice(&bytes).map_err(|source| StoreError::Serialization {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) async fn write_json<V: Serialize + ?Sized>(
    path: &Path,
    value: &V,
) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| StoreError::io(parent, e))?;
    }
    let bytes = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Serialization {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, &bytes)
        .await
        .map_err(|e| StoreError::io(&tmp, e))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| StoreError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: EntityId,
        text: String,
    }

    impl Record for Note {
        const FILE: &'static str = "notes.json";
        const ENTITY: &'static str = "Note";

        fn id(&self) -> EntityId {
            self.id
        }
    }

    fn note(text: &str) -> Note {
        Note {
            id: voxcat_core::types::new_id(),
            text: text.to_string(),
        }
    }

    async fn context() -> (tempfile::TempDir, ProjectContext) {
        let dir = tempfile::tempdir().unwrap();
        let store = crate::StoreRoot::open(dir.path()).await.unwrap();
        let ctx = store.project("p").unwrap();
        (dir, ctx)
    }

    #[tokio::test]
    async fn missing_file_is_error_or_empty() {
        let (_dir, ctx) = context().await;
        let err = load::<Note>(&ctx).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(load_or_empty::<Note>(&ctx).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn append_replace_remove() {
        let (_dir, ctx) = context().await;
        let a = note("a");
        let b = note("b");
        append(&ctx, &[a.clone(), b.clone()]).await.unwrap();

        let mut edited = a.clone();
        edited.text = "a2".into();
        assert!(replace(&ctx, &edited).await.unwrap());
        assert!(!replace(&ctx, &note("ghost")).await.unwrap());
        assert_eq!(find::<Note>(&ctx, a.id).await.unwrap().unwrap().text, "a2");

        let removed = remove_where::<Note, _>(&ctx, |n| n.id == b.id).await.unwrap();
        assert_eq!(removed, vec![b]);
        assert_eq!(load::<Note>(&ctx).await.unwrap(), vec![edited]);
    }

    #[tokio::test]
    async fn malformed_file_is_a_serialization_error() {
        let (_dir, ctx) = context().await;
        tokio::fs::create_dir_all(ctx.dir()).await.unwrap();
        tokio::fs::write(ctx.file(Note::FILE), b"{not json").await.unwrap();
        let err = load_or_empty::<Note>(&ctx).await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization { .. }));
    }

    #[tokio::test]
    async fn write_leaves_no_temp_file() {
        let (_dir, ctx) = context().await;
        save_all(&ctx, &[note("x")]).await.unwrap();
        assert!(ctx.file(Note::FILE).exists());
        assert!(!ctx.file("notes.json.tmp").exists());
    }
}
