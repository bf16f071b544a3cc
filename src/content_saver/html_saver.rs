use std::path::Path;

use super::filenames::write_unique;
use crate::errors::PersistenceError;

/// Archive the raw markup of one target under `archive_dir`.
///
/// Uses the same `_n` suffix policy as the CSV output, in its own directory.
/// Returns the file name that was written.
pub async fn archive_raw_markup(
    markup: &str,
    base_name: &str,
    archive_dir: &Path,
) -> Result<String, PersistenceError> {
    let name = write_unique(archive_dir, base_name, "html", markup.as_bytes()).await?;
    log::info!(
        "Raw HTML content saved to {}",
        archive_dir.join(&name).display()
    );
    Ok(name)
}
