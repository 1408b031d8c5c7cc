//! The narrow repository seam in front of the backing store.
//!
//! The hosted document store keeps one scalar-config document (hero copy,
//! marquee strings, FOMO pool) and two list collections (products, archive
//! entries), each entry addressable by its id. This trait mirrors exactly
//! that shape - get/patch for the config document, list/put/delete by id for
//! the collections - so the backing store is swappable and the facade can be
//! tested against [`crate::MemoryRepository`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use pixelpunk_core::{ArchiveItem, ArchiveItemId, HeroContent, Product, ProductId, SiteContent};

use crate::error::ContentError;

/// The scalar-config document (`site_content/main`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDoc {
    pub hero: HeroContent,
    pub marquee: Vec<String>,
    pub fomo_messages: Vec<String>,
    /// Server-side write timestamp; conflicts resolve last-write-wins on it.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Merge-patch for the scalar-config document.
///
/// Only the fields present are overwritten; the store keeps the rest. This
/// is the field-granularity last-write-wins model the facade documents:
/// concurrent editors clobber per field, never per character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero: Option<HeroContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marquee: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fomo_messages: Option<Vec<String>>,
}

impl SettingsPatch {
    /// A patch carrying every scalar field of `content` (used for seeding
    /// and reset, where the whole document is overwritten).
    #[must_use]
    pub fn full(content: &SiteContent) -> Self {
        Self {
            hero: Some(content.hero.clone()),
            marquee: Some(content.marquee.clone()),
            fomo_messages: Some(content.fomo_messages.clone()),
        }
    }
}

/// Backing store for editable site content.
///
/// All operations are independent: a failure in one must not poison another.
/// Implementations do not retry; the facade treats every error as terminal
/// for that call and moves on.
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Establish a session with the store.
    ///
    /// For stores that require authentication this performs the
    /// anonymous-identity handshake. Idempotent; safe to call once at init.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the handshake fails. The facade logs this
    /// and continues - individual calls will fail on their own terms.
    async fn connect(&self) -> Result<(), ContentError>;

    /// Fetch the scalar-config document, `None` if it has never been written.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the store is unreachable or denies access.
    async fn fetch_settings(&self) -> Result<Option<SettingsDoc>, ContentError>;

    /// Merge-patch the scalar-config document.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the write is rejected.
    async fn put_settings(&self, patch: &SettingsPatch) -> Result<(), ContentError>;

    /// List the products collection.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the store is unreachable or denies access.
    async fn list_products(&self) -> Result<Vec<Product>, ContentError>;

    /// Upsert one product, keyed on its id.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the write is rejected.
    async fn put_product(&self, product: &Product) -> Result<(), ContentError>;

    /// Delete one product by id. Deleting an absent id is not an error.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the delete is rejected.
    async fn delete_product(&self, id: &ProductId) -> Result<(), ContentError>;

    /// List the archive-entries collection.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the store is unreachable or denies access.
    async fn list_archive_items(&self) -> Result<Vec<ArchiveItem>, ContentError>;

    /// Upsert one archive entry, keyed on its id.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the write is rejected.
    async fn put_archive_item(&self, item: &ArchiveItem) -> Result<(), ContentError>;

    /// Delete one archive entry by id. Deleting an absent id is not an error.
    ///
    /// # Errors
    ///
    /// Returns `ContentError` if the delete is rejected.
    async fn delete_archive_item(&self, id: &ArchiveItemId) -> Result<(), ContentError>;
}
