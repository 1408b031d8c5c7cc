//! Local persisted cache.
//!
//! Mirrors the remote store's content as a single JSON blob at a fixed path,
//! the way the browser build kept it under one `localStorage` key. The cache
//! is the fast path at startup and the only backend when the site runs
//! offline.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pixelpunk_core::SiteContent;

use crate::error::ContentError;

/// Default cache file name, relative to the configured data directory.
pub const DEFAULT_CACHE_FILE: &str = "pixelpunk_content.json";

/// The on-disk cache envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedContent {
    /// When this blob was written. Remote state read at init overrides the
    /// cache regardless (the store is authoritative); the timestamp exists
    /// so divergence is at least visible in logs.
    pub saved_at: DateTime<Utc>,
    pub content: SiteContent,
}

/// A JSON-blob cache at a fixed path.
#[derive(Debug, Clone)]
pub struct LocalCache {
    path: PathBuf,
}

impl LocalCache {
    /// Create a cache handle for the given file path.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The cache file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the cached blob if present and readable.
    ///
    /// A missing file is a normal first run. A corrupt file is logged and
    /// treated as absent - the built-in defaults take over.
    #[must_use]
    pub fn load(&self) -> Option<CachedContent> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("failed to read content cache {:?}: {e}", self.path);
                return None;
            }
        };

        match serde_json::from_str::<CachedContent>(&raw) {
            Ok(cached) => Some(cached),
            Err(e) => {
                tracing::warn!("discarding corrupt content cache {:?}: {e}", self.path);
                None
            }
        }
    }

    /// Persist the current content snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Io` if the parent directory cannot be created
    /// or the file cannot be written, and `ContentError::Parse` if the
    /// snapshot fails to serialize.
    pub fn save(&self, content: &SiteContent) -> Result<(), ContentError> {
        let envelope = CachedContent {
            saved_at: Utc::now(),
            content: content.clone(),
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ContentError::Io(e.to_string()))?;
        }

        let raw = serde_json::to_string_pretty(&envelope)
            .map_err(|e| ContentError::Parse(e.to_string()))?;
        std::fs::write(&self.path, raw).map_err(|e| ContentError::Io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelpunk_core::defaults::default_content;

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = LocalCache::new(dir.path().join(DEFAULT_CACHE_FILE));
        assert!(cache.load().is_none());
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = LocalCache::new(dir.path().join(DEFAULT_CACHE_FILE));
        let content = default_content();

        cache.save(&content).expect("save");
        let cached = cache.load().expect("load");

        assert_eq!(cached.content, content);
    }

    #[test]
    fn test_corrupt_file_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(DEFAULT_CACHE_FILE);
        std::fs::write(&path, "{ not json").expect("write");

        let cache = LocalCache::new(path);
        assert!(cache.load().is_none());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache = LocalCache::new(dir.path().join("nested/data").join(DEFAULT_CACHE_FILE));

        cache.save(&default_content()).expect("save");
        assert!(cache.load().is_some());
    }
}
