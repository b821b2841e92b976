//! Single-slot JSON file cache for the dashboard view model
//!
//! The whole view model is serialized as one JSON document and replaced
//! atomically (write to a sibling temp file, then rename) so a crash
//! mid-write can never leave a half-written slot. A missing or corrupt
//! file reads as an empty cache.

use std::path::{Path, PathBuf};

use application::error::ApplicationError;
use application::ports::BundleCachePort;
use domain::entities::ViewModel;
use tracing::{debug, warn};

/// File-backed single-slot view-model cache
#[derive(Debug, Clone)]
pub struct JsonBundleCache {
    path: PathBuf,
}

impl JsonBundleCache {
    /// Create a cache over the given slot path
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Slot path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map_or_else(
            || std::ffi::OsString::from("bundle.json"),
            std::ffi::OsStr::to_os_string,
        );
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl BundleCachePort for JsonBundleCache {
    fn load(&self) -> Option<ViewModel> {
        let raw = match std::fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "failed to read cache slot");
                return None;
            }
        };
        match serde_json::from_slice::<ViewModel>(&raw) {
            Ok(view) => {
                debug!(path = %self.path.display(), "loaded cached view model");
                Some(view)
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "ignoring corrupt cache slot");
                None
            }
        }
    }

    fn store(&self, view: &ViewModel) -> Result<(), ApplicationError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| ApplicationError::Internal(format!("cache dir: {e}")))?;
            }
        }
        let raw = serde_json::to_vec(view)
            .map_err(|e| ApplicationError::Internal(format!("cache encode: {e}")))?;

        let temp = self.temp_path();
        std::fs::write(&temp, &raw)
            .map_err(|e| ApplicationError::Internal(format!("cache write: {e}")))?;
        std::fs::rename(&temp, &self.path)
            .map_err(|e| ApplicationError::Internal(format!("cache rename: {e}")))?;
        debug!(path = %self.path.display(), bytes = raw.len(), "persisted view model");
        Ok(())
    }
}
