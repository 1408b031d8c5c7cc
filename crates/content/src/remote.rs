//! Hosted document store client.
//!
//! Talks to the VaultDB document API: one scalar-config document at
//! `docs/site_content/main` and two list collections (`products`,
//! `archive_items`) with entries addressable by id. Writes require a session
//! token obtained through the anonymous-identity handshake; reads work with
//! the project API key alone.

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::instrument;

use pixelpunk_core::{ArchiveItem, ArchiveItemId, Product, ProductId};

use crate::error::ContentError;
use crate::repository::{ContentRepository, SettingsDoc, SettingsPatch};

/// Path of the scalar-config document.
const SETTINGS_DOC_PATH: &str = "docs/site_content/main";

/// Remote document store configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct RemoteStoreConfig {
    /// Base URL of the store's REST endpoint, e.g.
    /// `https://vaultdb.example.com/v1/projects/pixelpunk`.
    pub base_url: String,
    /// Project API key.
    pub api_key: SecretString,
}

impl std::fmt::Debug for RemoteStoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteStoreConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

/// Client for the hosted document store.
pub struct RemoteStore {
    client: reqwest::Client,
    base_url: String,
    /// Session token from the anonymous-identity handshake. Absent until
    /// [`ContentRepository::connect`] succeeds; requests without it rely on
    /// the API key and may be denied for writes.
    session_token: RwLock<Option<String>>,
}

#[derive(Debug, Deserialize)]
struct AnonymousSession {
    token: String,
}

#[derive(Debug, Deserialize)]
struct ListResponse<T> {
    items: Vec<T>,
}

impl RemoteStore {
    /// Create a client for the configured store.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Parse` if the API key contains characters that
    /// cannot appear in a header, and `ContentError::Http` if the HTTP
    /// client fails to build.
    pub fn new(config: &RemoteStoreConfig) -> Result<Self, ContentError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(config.api_key.expose_secret())
                .map_err(|e| ContentError::Parse(format!("invalid API key for header: {e}")))?,
        );

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session_token: RwLock::new(None),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }

    /// Attach the session token when the handshake has completed.
    async fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session_token.read().await.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Map a non-success response to a `ContentError`.
    async fn error_from(response: reqwest::Response) -> ContentError {
        let status = response.status();
        let message = response.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            ContentError::PermissionDenied(message)
        } else {
            ContentError::Api {
                status: status.as_u16(),
                message,
            }
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ContentError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn list<T: serde::de::DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Vec<T>, ContentError> {
        let request = self.client.get(self.url(&format!("collections/{collection}")));
        let response = Self::check(self.authorized(request).await.send().await?).await?;
        let listed: ListResponse<T> = response
            .json()
            .await
            .map_err(|e| ContentError::Parse(e.to_string()))?;
        Ok(listed.items)
    }

    async fn put<T: serde::Serialize + Sync>(
        &self,
        collection: &str,
        id: &str,
        entry: &T,
    ) -> Result<(), ContentError> {
        let request = self
            .client
            .put(self.url(&format!("collections/{collection}/{id}")))
            .json(entry);
        Self::check(self.authorized(request).await.send().await?).await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), ContentError> {
        let request = self
            .client
            .delete(self.url(&format!("collections/{collection}/{id}")));
        let response = self.authorized(request).await.send().await?;
        // Deleting an absent entry is a no-op, matching upsert semantics.
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(());
        }
        Self::check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl ContentRepository for RemoteStore {
    #[instrument(skip(self))]
    async fn connect(&self) -> Result<(), ContentError> {
        let response = self
            .client
            .post(self.url("auth/anonymous"))
            .send()
            .await?;
        let response = Self::check(response).await?;
        let session: AnonymousSession = response
            .json()
            .await
            .map_err(|e| ContentError::Parse(e.to_string()))?;
        *self.session_token.write().await = Some(session.token);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn fetch_settings(&self) -> Result<Option<SettingsDoc>, ContentError> {
        let request = self.client.get(self.url(SETTINGS_DOC_PATH));
        let response = self.authorized(request).await.send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::check(response).await?;
        let doc = response
            .json()
            .await
            .map_err(|e| ContentError::Parse(e.to_string()))?;
        Ok(Some(doc))
    }

    #[instrument(skip(self, patch))]
    async fn put_settings(&self, patch: &SettingsPatch) -> Result<(), ContentError> {
        let request = self.client.patch(self.url(SETTINGS_DOC_PATH)).json(patch);
        Self::check(self.authorized(request).await.send().await?).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, ContentError> {
        self.list("products").await
    }

    #[instrument(skip(self, product), fields(id = %product.id))]
    async fn put_product(&self, product: &Product) -> Result<(), ContentError> {
        self.put("products", product.id.as_str(), product).await
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, id: &ProductId) -> Result<(), ContentError> {
        self.delete("products", id.as_str()).await
    }

    #[instrument(skip(self))]
    async fn list_archive_items(&self) -> Result<Vec<ArchiveItem>, ContentError> {
        self.list("archive_items").await
    }

    #[instrument(skip(self, item), fields(id = %item.id))]
    async fn put_archive_item(&self, item: &ArchiveItem) -> Result<(), ContentError> {
        self.put("archive_items", item.id.as_str(), item).await
    }

    #[instrument(skip(self))]
    async fn delete_archive_item(&self, id: &ArchiveItemId) -> Result<(), ContentError> {
        self.delete("archive_items", id.as_str()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RemoteStore {
        RemoteStore::new(&RemoteStoreConfig {
            base_url: "https://vaultdb.example.com/v1/projects/pixelpunk/".to_string(),
            api_key: SecretString::from("k-3f9a1c77d2e8"),
        })
        .expect("client")
    }

    #[test]
    fn test_url_joins_without_double_slash() {
        let store = store();
        assert_eq!(
            store.url(SETTINGS_DOC_PATH),
            "https://vaultdb.example.com/v1/projects/pixelpunk/docs/site_content/main"
        );
    }

    #[test]
    fn test_config_debug_redacts_api_key() {
        let config = RemoteStoreConfig {
            base_url: "https://vaultdb.example.com/v1".to_string(),
            api_key: SecretString::from("super_secret_key"),
        };
        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_key"));
    }
}
