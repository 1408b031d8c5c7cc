//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use crate::services::media;

/// Request an optimized 800px-wide delivery variant of a CDN image URL.
///
/// Usage in templates: `{{ product.image_url|vault_image }}`
#[askama::filter_fn]
pub fn vault_image(url: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(media::optimize_delivery_url(
        &url.to_string(),
        media::DEFAULT_DELIVERY_WIDTH,
    ))
}

/// Request a 320px-wide thumbnail variant of a CDN image URL.
///
/// Usage in templates: `{{ product.image_url|thumb_image }}`
#[askama::filter_fn]
pub fn thumb_image(url: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(media::optimize_delivery_url(&url.to_string(), 320))
}
