//! CSV encoding and file writing shared by every tabular output
//!
//! Rows are serialised into an in-memory buffer first. Whole documents are
//! then staged in a synced temp file next to their target and only linked or
//! renamed into place once complete, so a failed write never leaves a
//! truncated file under the final name.

use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::errors::PersistenceError;

/// Encode rows as CSV, optionally preceded by the header record.
///
/// The header is written explicitly so that zero rows still yields a valid,
/// header-only document.
pub(crate) fn encode_csv<T: Serialize>(
    columns: &[&str],
    rows: &[T],
    write_header: bool,
) -> Result<Vec<u8>, PersistenceError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    if write_header {
        writer.write_record(columns)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| PersistenceError::Buffer(e.to_string()))
}

/// Create the parent directory of `path` if it has one
pub(crate) async fn ensure_parent_dir(path: &Path) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| PersistenceError::io(parent, e))?;
    }
    Ok(())
}

/// Append rows to a CSV file, writing the header first if the file is new or empty.
///
/// Returns `true` when the file was created by this call.
pub(crate) async fn append_csv<T: Serialize>(
    path: &Path,
    columns: &[&str],
    rows: &[T],
) -> Result<bool, PersistenceError> {
    let needs_header = match tokio::fs::metadata(path).await {
        Ok(meta) => meta.len() == 0,
        Err(e) if e.kind() == ErrorKind::NotFound => true,
        Err(e) => return Err(PersistenceError::io(path, e)),
    };

    ensure_parent_dir(path).await?;
    let bytes = encode_csv(columns, rows, needs_header)?;

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(|e| PersistenceError::io(path, e))?;

    file.write_all(&bytes)
        .await
        .map_err(|e| PersistenceError::io(path, e))?;
    file.flush().await.map_err(|e| PersistenceError::io(path, e))?;
    file.sync_data()
        .await
        .map_err(|e| PersistenceError::io(path, e))?;

    Ok(needs_header)
}

/// A fully written and synced temp file beside its target.
///
/// The temp file is removed on drop, which covers every error path between
/// staging and publishing.
pub(crate) struct StagedFile {
    path: PathBuf,
}

impl StagedFile {
    /// Write `bytes` to `.{target name}.{uuid}.tmp` in the target's directory.
    pub(crate) async fn create(target: &Path, bytes: &[u8]) -> Result<Self, PersistenceError> {
        ensure_parent_dir(target).await?;

        let file_name = target
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let staged = Self {
            path: target.with_file_name(format!(".{file_name}.{}.tmp", Uuid::new_v4().simple())),
        };

        let mut file = tokio::fs::File::create(&staged.path)
            .await
            .map_err(|e| PersistenceError::io(&staged.path, e))?;
        file.write_all(bytes)
            .await
            .map_err(|e| PersistenceError::io(&staged.path, e))?;
        file.sync_all()
            .await
            .map_err(|e| PersistenceError::io(&staged.path, e))?;

        Ok(staged)
    }

    /// Publish under `target` without replacing an existing file.
    ///
    /// Fails with `ErrorKind::AlreadyExists` when the name is taken; the staged
    /// copy stays available for the next candidate name.
    pub(crate) async fn link_to(&self, target: &Path) -> Result<(), PersistenceError> {
        tokio::fs::hard_link(&self.path, target)
            .await
            .map_err(|e| PersistenceError::io(target, e))
    }

    /// Publish under `target`, replacing whatever is there.
    pub(crate) async fn rename_to(self, target: &Path) -> Result<(), PersistenceError> {
        tokio::fs::rename(&self.path, target)
            .await
            .map_err(|e| PersistenceError::io(target, e))
    }

    #[cfg(test)]
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for StagedFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path)
            && e.kind() != ErrorKind::NotFound
        {
            log::warn!("Failed to remove temp file {}: {e}", self.path.display());
        }
    }
}

/// Replace `path` with the given bytes, creating it if needed
pub(crate) async fn overwrite_file(path: &Path, bytes: &[u8]) -> Result<(), PersistenceError> {
    StagedFile::create(path, bytes).await?.rename_to(path).await
}
