//! Application state shared across handlers.

use std::sync::Arc;

use pixelpunk_content::{ContentService, LocalCache, RemoteStore};

use crate::config::StorefrontConfig;
use crate::services::curator::{CuratorClient, CuratorError};
use crate::services::media::{MediaClient, MediaError};

/// Error creating application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("content store client: {0}")]
    Content(#[from] pixelpunk_content::ContentError),
    #[error("media client: {0}")]
    Media(#[from] MediaError),
    #[error("curator client: {0}")]
    Curator(#[from] CuratorError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// content facade and the optional hosted-service clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    content: ContentService,
    media: Option<MediaClient>,
    curator: Option<CuratorClient>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The content facade starts from the local cache immediately; call
    /// [`ContentService::init`] (usually from a background task) to
    /// synchronize with the remote store.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured hosted-service client fails to
    /// build.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let repo = match &config.remote_store {
            Some(remote) => Some(
                Arc::new(RemoteStore::new(remote)?) as Arc<dyn pixelpunk_content::ContentRepository>
            ),
            None => None,
        };
        let cache = LocalCache::new(config.cache_path());
        let content = ContentService::new(repo, Some(cache));

        let media = config.media.as_ref().map(MediaClient::new).transpose()?;
        let curator = config.curator.as_ref().map(CuratorClient::new).transpose()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                content,
                media,
                curator,
            }),
        })
    }

    /// Build state around an existing content facade (used by tests to
    /// inject an in-memory repository).
    #[must_use]
    pub fn with_content(config: StorefrontConfig, content: ContentService) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                content,
                media: None,
                curator: None,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the content facade.
    #[must_use]
    pub fn content(&self) -> &ContentService {
        &self.inner.content
    }

    /// Get the media CDN client, if uploads are configured.
    #[must_use]
    pub fn media(&self) -> Option<&MediaClient> {
        self.inner.media.as_ref()
    }

    /// Get the curator client, if the AI features are configured.
    #[must_use]
    pub fn curator(&self) -> Option<&CuratorClient> {
        self.inner.curator.as_ref()
    }
}
