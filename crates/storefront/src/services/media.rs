//! Media CDN client for image uploads and delivery transforms.
//!
//! Uploads go to the CDN's unsigned multipart endpoint with an
//! upload-preset token. Delivery URLs accept an inline transformation
//! segment (`f_auto,q_auto,w_{width}`) spliced into the path to request a
//! resized, format-negotiated asset.

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use thiserror::Error;
use tracing::instrument;

use crate::config::MediaConfig;

/// Upload endpoint base.
const UPLOAD_BASE_URL: &str = "https://api.cloudinary.com/v1_1";

/// Default delivery width when the caller does not specify one.
pub const DEFAULT_DELIVERY_WIDTH: u32 = 800;

/// Errors that can occur when talking to the media CDN.
#[derive(Debug, Error)]
pub enum MediaError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// CDN returned an error response.
    #[error("CDN error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the upload response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A stored asset, as reported by the CDN after upload.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaUpload {
    /// HTTPS retrieval URL.
    pub secure_url: String,
    /// CDN-assigned public id.
    pub public_id: String,
    /// Stored format (e.g. `jpg`).
    pub format: String,
    /// Stored size in bytes.
    pub bytes: u64,
}

/// Error body shape returned by the CDN.
#[derive(Debug, Deserialize)]
struct UploadErrorBody {
    error: UploadErrorMessage,
}

#[derive(Debug, Deserialize)]
struct UploadErrorMessage {
    message: String,
}

/// Media CDN client.
#[derive(Clone)]
pub struct MediaClient {
    client: reqwest::Client,
    cloud_name: String,
    upload_preset: String,
}

impl MediaClient {
    /// Create a new media client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &MediaConfig) -> Result<Self, MediaError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            cloud_name: config.cloud_name.clone(),
            upload_preset: config.upload_preset.clone(),
        })
    }

    /// Upload one file and return its stored metadata.
    ///
    /// The result is logged to the media index so the asset can be traced
    /// back from the content store.
    ///
    /// # Errors
    ///
    /// Returns `MediaError` if the request fails or the CDN rejects the
    /// upload; the caller surfaces this to the admin and aborts.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload(
        &self,
        file_name: &str,
        mime_type: &str,
        bytes: Vec<u8>,
    ) -> Result<MediaUpload, MediaError> {
        let url = format!("{UPLOAD_BASE_URL}/{}/auto/upload", self.cloud_name);

        let part = Part::bytes(bytes)
            .file_name(file_name.to_owned())
            .mime_str(mime_type)
            .map_err(|e| MediaError::Parse(format!("invalid MIME type {mime_type}: {e}")))?;
        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone());

        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<UploadErrorBody>(&body)
                .map_or(body, |parsed| parsed.error.message);
            return Err(MediaError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let upload: MediaUpload = response
            .json()
            .await
            .map_err(|e| MediaError::Parse(e.to_string()))?;

        tracing::info!(
            target: "media_index",
            public_id = %upload.public_id,
            format = %upload.format,
            bytes = upload.bytes,
            "asset uploaded"
        );

        Ok(upload)
    }
}

/// Splice the delivery transform into a CDN URL.
///
/// Inserts `f_auto,q_auto,w_{width}` after the `/upload/` segment so the CDN
/// serves a resized, format-negotiated variant. URLs that are not CDN
/// delivery URLs pass through unchanged.
#[must_use]
pub fn optimize_delivery_url(url: &str, width: u32) -> String {
    if !url.contains("cloudinary.com") {
        return url.to_owned();
    }
    if let Some(idx) = url.find("/upload/") {
        let (head, tail) = url.split_at(idx + "/upload/".len());
        return format!("{head}f_auto,q_auto,w_{width}/{tail}");
    }
    url.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimize_inserts_transform_segment() {
        let url = "https://res.cloudinary.com/ds2mbrzcn/image/upload/v17/sample.jpg";
        assert_eq!(
            optimize_delivery_url(url, 800),
            "https://res.cloudinary.com/ds2mbrzcn/image/upload/f_auto,q_auto,w_800/v17/sample.jpg"
        );
    }

    #[test]
    fn test_optimize_respects_width() {
        let url = "https://res.cloudinary.com/demo/image/upload/shirt.png";
        assert!(optimize_delivery_url(url, 320).contains("w_320/"));
    }

    #[test]
    fn test_optimize_passes_through_foreign_urls() {
        let url = "https://images.unsplash.com/photo-1591047139829?q=80";
        assert_eq!(optimize_delivery_url(url, 800), url);
    }

    #[test]
    fn test_optimize_passes_through_cdn_urls_without_upload_segment() {
        let url = "https://res.cloudinary.com/demo/raw/fetch/shirt.png";
        assert_eq!(optimize_delivery_url(url, 800), url);
    }
}
