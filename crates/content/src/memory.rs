//! In-memory repository fake.
//!
//! Used by the facade tests and by the CLI's `--dry-run` mode. Behaves like
//! the hosted store (upsert keyed on id, merge-patch on the config document)
//! but keeps everything in a mutex-guarded struct.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use pixelpunk_core::{ArchiveItem, ArchiveItemId, Product, ProductId};

use crate::error::ContentError;
use crate::repository::{ContentRepository, SettingsDoc, SettingsPatch};

#[derive(Debug, Default)]
struct MemoryState {
    settings: Option<SettingsDoc>,
    products: Vec<Product>,
    archive_items: Vec<ArchiveItem>,
}

/// An in-memory [`ContentRepository`].
#[derive(Debug, Default)]
pub struct MemoryRepository {
    state: Mutex<MemoryState>,
}

impl MemoryRepository {
    /// Create an empty repository (the "first run" state of a hosted store).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored products (test helper).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn product_count(&self) -> usize {
        self.state.lock().expect("memory store lock").products.len()
    }

    /// Number of stored archive entries (test helper).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn archive_count(&self) -> usize {
        self.state
            .lock()
            .expect("memory store lock")
            .archive_items
            .len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl ContentRepository for MemoryRepository {
    async fn connect(&self) -> Result<(), ContentError> {
        Ok(())
    }

    async fn fetch_settings(&self) -> Result<Option<SettingsDoc>, ContentError> {
        Ok(self.lock().settings.clone())
    }

    async fn put_settings(&self, patch: &SettingsPatch) -> Result<(), ContentError> {
        let mut state = self.lock();
        let mut doc = state.settings.clone().unwrap_or(SettingsDoc {
            hero: pixelpunk_core::defaults::default_content().hero,
            marquee: Vec::new(),
            fomo_messages: Vec::new(),
            updated_at: None,
        });
        if let Some(hero) = &patch.hero {
            doc.hero = hero.clone();
        }
        if let Some(marquee) = &patch.marquee {
            doc.marquee = marquee.clone();
        }
        if let Some(fomo) = &patch.fomo_messages {
            doc.fomo_messages = fomo.clone();
        }
        doc.updated_at = Some(Utc::now());
        state.settings = Some(doc);
        Ok(())
    }

    async fn list_products(&self) -> Result<Vec<Product>, ContentError> {
        Ok(self.lock().products.clone())
    }

    async fn put_product(&self, product: &Product) -> Result<(), ContentError> {
        let mut state = self.lock();
        match state.products.iter_mut().find(|p| p.id == product.id) {
            Some(slot) => *slot = product.clone(),
            None => state.products.push(product.clone()),
        }
        Ok(())
    }

    async fn delete_product(&self, id: &ProductId) -> Result<(), ContentError> {
        self.lock().products.retain(|p| &p.id != id);
        Ok(())
    }

    async fn list_archive_items(&self) -> Result<Vec<ArchiveItem>, ContentError> {
        Ok(self.lock().archive_items.clone())
    }

    async fn put_archive_item(&self, item: &ArchiveItem) -> Result<(), ContentError> {
        let mut state = self.lock();
        match state.archive_items.iter_mut().find(|i| i.id == item.id) {
            Some(slot) => *slot = item.clone(),
            None => state.archive_items.push(item.clone()),
        }
        Ok(())
    }

    async fn delete_archive_item(&self, id: &ArchiveItemId) -> Result<(), ContentError> {
        self.lock().archive_items.retain(|i| &i.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelpunk_core::defaults;

    #[tokio::test]
    async fn test_put_is_upsert_by_id() {
        let repo = MemoryRepository::new();
        let mut product = defaults::default_products().remove(0);

        repo.put_product(&product).await.expect("put");
        product.name = "RENAMED".to_string();
        repo.put_product(&product).await.expect("put again");

        let listed = repo.list_products().await.expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(listed.first().map(|p| p.name.as_str()), Some("RENAMED"));
    }

    #[tokio::test]
    async fn test_settings_merge_patch() {
        let repo = MemoryRepository::new();
        let content = defaults::default_content();

        repo.put_settings(&SettingsPatch::full(&content))
            .await
            .expect("seed");
        repo.put_settings(&SettingsPatch {
            marquee: Some(vec!["ONLY THIS CHANGES".to_string()]),
            ..SettingsPatch::default()
        })
        .await
        .expect("patch");

        let doc = repo.fetch_settings().await.expect("fetch").expect("present");
        assert_eq!(doc.marquee, vec!["ONLY THIS CHANGES".to_string()]);
        assert_eq!(doc.hero, content.hero);
        assert_eq!(doc.fomo_messages, content.fomo_messages);
        assert!(doc.updated_at.is_some());
    }
}
