//! Collision-free output naming
//!
//! `name.ext`, then `name_1.ext`, `name_2.ext`, ... until a free name is found.
//! The document is staged once and hard-linked under each candidate, so an
//! existing file is never overwritten even if it appears between two attempts.

use std::io::ErrorKind;
use std::path::Path;

use super::csv_io::StagedFile;
use crate::errors::PersistenceError;

/// The `n`-th candidate name for `base`; `n == 0` is the unsuffixed name.
#[must_use]
pub fn candidate_name(base: &str, extension: &str, n: usize) -> String {
    if n == 0 {
        format!("{base}.{extension}")
    } else {
        format!("{base}_{n}.{extension}")
    }
}

/// Write `bytes` under the first free candidate name in `dir`.
///
/// Returns the file name that was used.
pub(crate) async fn write_unique(
    dir: &Path,
    base: &str,
    extension: &str,
    bytes: &[u8],
) -> Result<String, PersistenceError> {
    let staged = StagedFile::create(&dir.join(candidate_name(base, extension, 0)), bytes).await?;

    let mut counter = 0usize;
    loop {
        let name = candidate_name(base, extension, counter);
        match staged.link_to(&dir.join(&name)).await {
            Ok(()) => return Ok(name),
            Err(PersistenceError::Io { source, .. })
                if source.kind() == ErrorKind::AlreadyExists =>
            {
                counter += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
