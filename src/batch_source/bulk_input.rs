//! Bulk input file: a `URL,Selector` work queue
//!
//! Created header-only when absent and cleared back to header-only after a
//! run that attempted every row.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::content_saver::csv_io::{encode_csv, overwrite_file};
use crate::errors::PersistenceError;
use crate::ledger::IngestionKey;

pub const BULK_INPUT_COLUMNS: [&str; 2] = ["URL", "Selector"];

/// `selector`, or `default` when it is blank
#[must_use]
pub fn selector_or_default(selector: Option<&str>, default: &str) -> String {
    match selector.map(str::trim) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => default.to_string(),
    }
}

/// Parse bulk input bytes into keys in file order.
///
/// A header missing either column is reported and yields no keys. Rows with a
/// blank URL are skipped.
pub(crate) fn parse_bulk_input(
    bytes: &[u8],
    default_selector: &str,
    source: &Path,
) -> Result<Vec<IngestionKey>, PersistenceError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h == name);
    let (Some(url_idx), Some(selector_idx)) = (column("URL"), column("Selector")) else {
        log::error!(
            "{} must contain 'URL' and 'Selector' columns",
            source.display()
        );
        return Ok(Vec::new());
    };

    let mut keys = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let url = record.get(url_idx).unwrap_or_default();
        if url.is_empty() {
            log::warn!("Skipping row {} of {}: empty URL", line + 2, source.display());
            continue;
        }
        let selector = selector_or_default(record.get(selector_idx), default_selector);
        keys.push(IngestionKey::new(url, selector));
    }
    Ok(keys)
}

#[derive(Debug, Clone)]
pub struct BulkInput {
    path: PathBuf,
    default_selector: String,
}

impl BulkInput {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, default_selector: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            default_selector: default_selector.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every queued key, creating a header-only file when none exists
    pub async fn read(&self) -> Result<Vec<IngestionKey>, PersistenceError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.clear().await?;
                log::info!("{} created with headers only.", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(PersistenceError::io(&self.path, e)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        parse_bulk_input(&bytes, &self.default_selector, &self.path)
    }

    /// Like [`read`](Self::read), but an unreadable or malformed file is logged
    /// and treated as empty, so the caller falls back to manual entry.
    pub async fn queued(&self) -> Vec<IngestionKey> {
        self.read().await.unwrap_or_else(|e| {
            log::error!("Error reading {}: {e}", self.path.display());
            Vec::new()
        })
    }

    /// Rewrite the file with its header and no rows
    pub async fn clear(&self) -> Result<(), PersistenceError> {
        let bytes = encode_csv::<()>(&BULK_INPUT_COLUMNS, &[], true)?;
        overwrite_file(&self.path, &bytes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_selector_uses_default() {
        let keys = parse_bulk_input(
            b"URL,Selector\nhttps://a.com/x,\nhttps://b.com/y,article\n",
            "main",
            Path::new("BulkIngestion.csv"),
        )
        .unwrap();
        assert_eq!(
            keys,
            vec![
                IngestionKey::new("https://a.com/x", "main"),
                IngestionKey::new("https://b.com/y", "article"),
            ]
        );
    }

    #[test]
    fn missing_column_yields_nothing() {
        let keys = parse_bulk_input(
            b"URL\nhttps://a.com/x\n",
            "main",
            Path::new("BulkIngestion.csv"),
        )
        .unwrap();
        assert!(keys.is_empty());
    }

    #[test]
    fn short_rows_and_blank_urls() {
        let keys = parse_bulk_input(
            b"URL,Selector\nhttps://a.com/x\n,article\n",
            "main",
            Path::new("BulkIngestion.csv"),
        )
        .unwrap();
        assert_eq!(keys, vec![IngestionKey::new("https://a.com/x", "main")]);
    }

    #[test]
    fn selector_or_default_trims() {
        assert_eq!(selector_or_default(Some("  "), "main"), "main");
        assert_eq!(selector_or_default(None, "main"), "main");
        assert_eq!(selector_or_default(Some(" #post "), "main"), "#post");
    }
}
