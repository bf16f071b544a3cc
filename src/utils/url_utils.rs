//! URL and file-name helpers.
//!
//! Output files are named after the target they came from, so these helpers
//! turn a target URL into a stable, filesystem-safe base name.

use url::Url;

use super::constants::FALLBACK_FILENAME;

/// Derive `{domain}-{lastPathSegment}` from a target URL.
///
/// - a leading `www.` is dropped from the domain
/// - a trailing slash is ignored when picking the last segment
/// - a URL with no path segment uses the domain as its segment
/// - spaces and `%20` become `_`, then the name is sanitised for the filesystem
///
/// Unparseable input falls back to [`FALLBACK_FILENAME`].
#[must_use]
pub fn base_filename(url: &str) -> String {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::error!("Error extracting file name from URL {url}: {e}");
            return FALLBACK_FILENAME.to_string();
        }
    };

    let Some(host) = parsed.host_str() else {
        log::error!("Error extracting file name from URL {url}: no host");
        return FALLBACK_FILENAME.to_string();
    };
    let domain = host.strip_prefix("www.").unwrap_or(host);

    let last_segment = parsed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .unwrap_or(domain);

    let raw = format!("{domain}-{last_segment}")
        .replace("%20", "_")
        .replace(' ', "_");
    let sanitized = sanitize_filename::sanitize(raw);

    if sanitized.is_empty() {
        FALLBACK_FILENAME.to_string()
    } else {
        sanitized
    }
}

/// Check if a URL is an http(s) URL worth handing to the browser
#[must_use]
pub fn is_valid_url(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    if url.starts_with("data:") || url.starts_with("javascript:") || url.starts_with("mailto:") {
        return false;
    }

    match Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}
