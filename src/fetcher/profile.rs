//! Per-session Chrome profile directory
//!
//! Every launch gets its own UUID-named directory under the system temp dir,
//! so concurrent sessions never contend for Chrome's `SingletonLock`.

use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

const PROFILE_PREFIX: &str = "kodegen_ingest_chrome";

/// Profile directory removed on drop
#[derive(Debug)]
pub struct BrowserProfile {
    path: PathBuf,
}

impl BrowserProfile {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for BrowserProfile {
    fn drop(&mut self) {
        if self.path.exists() {
            debug!("Removing browser profile {}", self.path.display());
            if let Err(e) = std::fs::remove_dir_all(&self.path) {
                warn!(
                    "Failed to remove browser profile {}: {e}",
                    self.path.display()
                );
            }
        }
    }
}

/// Create a fresh profile directory.
///
/// Uses `create_dir`, so an existing directory of the same name is an error.
pub fn create_unique_profile() -> io::Result<BrowserProfile> {
    let path = std::env::temp_dir().join(format!("{PROFILE_PREFIX}_{}", Uuid::new_v4()));
    std::fs::create_dir(&path)?;
    debug!("Created browser profile {}", path.display());
    Ok(BrowserProfile { path })
}
