//! The content facade.
//!
//! Owns the in-memory [`SiteContent`] snapshot and reconciles it with the
//! local cache and the remote document store. Explicit lifecycle: construct
//! with injected backends, [`ContentService::init`] once at startup,
//! [`ContentService::subscribe`] for change notification, mutate through the
//! update operations, [`ContentService::dispose`] on shutdown.
//!
//! Every mutation is optimistic: memory first, then a best-effort write to
//! the store and the cache. A failed write is logged and the optimistic
//! value stays - last write wins at field/document granularity, and the next
//! successful write re-converges the tiers.

use std::sync::Arc;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;
use tracing::instrument;

use pixelpunk_core::defaults::default_content;
use pixelpunk_core::{ArchiveItem, ArchiveItemId, HeroContent, Product, ProductId, SiteContent};

use crate::cache::LocalCache;
use crate::repository::{ContentRepository, SettingsPatch};

/// Single source of truth for editable site content.
///
/// Cheaply cloneable via `Arc`; reads never block on the network.
#[derive(Clone)]
pub struct ContentService {
    inner: Arc<ServiceInner>,
}

struct ServiceInner {
    state: RwLock<SiteContent>,
    loading: AtomicBool,
    watch_tx: watch::Sender<SiteContent>,
    repo: Option<Arc<dyn ContentRepository>>,
    cache: Option<LocalCache>,
}

impl ContentService {
    /// Construct the facade.
    ///
    /// Loads the local cache synchronously as the fast path (the site is
    /// usable before any remote round-trip), falling back to the built-in
    /// defaults. Pass `None` for either backend to run without it.
    #[must_use]
    pub fn new(repo: Option<Arc<dyn ContentRepository>>, cache: Option<LocalCache>) -> Self {
        let content = cache
            .as_ref()
            .and_then(LocalCache::load)
            .map_or_else(
                || {
                    tracing::info!("no content cache, starting from built-in defaults");
                    default_content()
                },
                |cached| {
                    tracing::info!(saved_at = %cached.saved_at, "loaded content cache");
                    cached.content
                },
            );

        let (watch_tx, _) = watch::channel(content.clone());

        Self {
            inner: Arc::new(ServiceInner {
                state: RwLock::new(content),
                loading: AtomicBool::new(true),
                watch_tx,
                repo,
                cache,
            }),
        }
    }

    /// Synchronize with the remote store.
    ///
    /// Each remote call is independently wrapped: a permission or network
    /// error on one field or collection must not prevent the others from
    /// loading, and the loading flag clears no matter what - the site must
    /// be usable offline. Empty remote collections are seeded from the
    /// current snapshot and the seed written back.
    #[instrument(skip(self))]
    pub async fn init(&self) {
        if let Some(repo) = self.inner.repo.clone() {
            if let Err(e) = repo.connect().await {
                tracing::warn!("content store handshake failed: {e}");
            }

            self.sync_settings(repo.as_ref()).await;
            self.sync_products(repo.as_ref()).await;
            self.sync_archive_items(repo.as_ref()).await;

            self.save_cache();
        } else {
            tracing::info!("no remote content store configured, running from cache/defaults");
        }

        self.inner.loading.store(false, Ordering::Release);
        tracing::info!("content facade ready");
    }

    async fn sync_settings(&self, repo: &dyn ContentRepository) {
        match repo.fetch_settings().await {
            Ok(Some(doc)) => {
                self.apply(|content| {
                    content.hero = doc.hero.clone();
                    content.marquee = doc.marquee.clone();
                    content.fomo_messages = doc.fomo_messages.clone();
                });
            }
            Ok(None) => {
                let seed = SettingsPatch::full(&self.content());
                if let Err(e) = repo.put_settings(&seed).await {
                    tracing::warn!("failed to seed settings document: {e}");
                }
            }
            Err(e) => tracing::warn!("settings fetch failed, keeping local value: {e}"),
        }
    }

    async fn sync_products(&self, repo: &dyn ContentRepository) {
        match repo.list_products().await {
            Ok(remote) if remote.is_empty() => {
                let seed = self.content().products;
                for product in &seed {
                    if let Err(e) = repo.put_product(product).await {
                        tracing::warn!(id = %product.id, "failed to seed product: {e}");
                    }
                }
            }
            Ok(remote) => {
                self.apply(|content| content.products = remote.clone());
            }
            Err(e) => tracing::warn!("product fetch failed, keeping local list: {e}"),
        }
    }

    async fn sync_archive_items(&self, repo: &dyn ContentRepository) {
        match repo.list_archive_items().await {
            Ok(remote) if remote.is_empty() => {
                let seed = self.content().archive_items;
                for item in &seed {
                    if let Err(e) = repo.put_archive_item(item).await {
                        tracing::warn!(id = %item.id, "failed to seed archive entry: {e}");
                    }
                }
            }
            Ok(remote) => {
                self.apply(|content| content.archive_items = remote.clone());
            }
            Err(e) => tracing::warn!("archive fetch failed, keeping local list: {e}"),
        }
    }

    /// Current in-memory snapshot. Never blocks on I/O.
    ///
    /// # Panics
    ///
    /// Panics if the state lock is poisoned (a prior writer panicked).
    #[must_use]
    pub fn content(&self) -> SiteContent {
        self.inner.state.read().expect("content state lock").clone()
    }

    /// Whether the initial remote synchronization is still in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner.loading.load(Ordering::Acquire)
    }

    /// Subscribe to content snapshots. The receiver observes the value as of
    /// subscription and every mutation after it.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SiteContent> {
        self.inner.watch_tx.subscribe()
    }

    /// Merge-patch the hero copy.
    #[instrument(skip(self, hero))]
    pub async fn update_hero(&self, hero: HeroContent) {
        self.apply(|content| content.hero = hero.clone());
        self.persist_settings(SettingsPatch {
            hero: Some(hero),
            ..SettingsPatch::default()
        })
        .await;
    }

    /// Replace the marquee strings.
    #[instrument(skip(self, marquee))]
    pub async fn update_marquee(&self, marquee: Vec<String>) {
        self.apply(|content| content.marquee = marquee.clone());
        self.persist_settings(SettingsPatch {
            marquee: Some(marquee),
            ..SettingsPatch::default()
        })
        .await;
    }

    /// Replace the FOMO notification pool.
    #[instrument(skip(self, fomo))]
    pub async fn update_fomo(&self, fomo: Vec<String>) {
        self.apply(|content| content.fomo_messages = fomo.clone());
        self.persist_settings(SettingsPatch {
            fomo_messages: Some(fomo),
            ..SettingsPatch::default()
        })
        .await;
    }

    /// Upsert a product, keyed on its id.
    #[instrument(skip(self, product), fields(id = %product.id))]
    pub async fn upsert_product(&self, product: Product) {
        self.apply(|content| content.upsert_product(product.clone()));
        if let Some(repo) = &self.inner.repo {
            if let Err(e) = repo.put_product(&product).await {
                tracing::warn!("product write failed, keeping optimistic value: {e}");
            }
        }
        self.save_cache();
    }

    /// Delete a product by id.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: &ProductId) {
        self.apply(|content| content.delete_product(id));
        if let Some(repo) = &self.inner.repo {
            if let Err(e) = repo.delete_product(id).await {
                tracing::warn!("product delete failed, keeping optimistic value: {e}");
            }
        }
        self.save_cache();
    }

    /// Upsert an archive entry, keyed on its id.
    #[instrument(skip(self, item), fields(id = %item.id))]
    pub async fn upsert_archive_item(&self, item: ArchiveItem) {
        self.apply(|content| content.upsert_archive_item(item.clone()));
        if let Some(repo) = &self.inner.repo {
            if let Err(e) = repo.put_archive_item(&item).await {
                tracing::warn!("archive write failed, keeping optimistic value: {e}");
            }
        }
        self.save_cache();
    }

    /// Delete an archive entry by id.
    #[instrument(skip(self))]
    pub async fn delete_archive_item(&self, id: &ArchiveItemId) {
        self.apply(|content| content.delete_archive_item(id));
        if let Some(repo) = &self.inner.repo {
            if let Err(e) = repo.delete_archive_item(id).await {
                tracing::warn!("archive delete failed, keeping optimistic value: {e}");
            }
        }
        self.save_cache();
    }

    /// Overwrite everything with the built-in defaults.
    ///
    /// Destructive; callers must have confirmed with the operator first.
    /// The remote collections are cleared entry by entry and reseeded, the
    /// scalar document overwritten directly. Every remote step is
    /// best-effort: memory and cache hold the defaults even if the store is
    /// down.
    #[instrument(skip(self))]
    pub async fn reset_to_defaults(&self) {
        let previous = self.content();
        let defaults = default_content();
        self.apply(|content| *content = defaults.clone());

        if let Some(repo) = &self.inner.repo {
            self.clear_remote_collections(repo.as_ref(), &previous).await;

            for product in &defaults.products {
                if let Err(e) = repo.put_product(product).await {
                    tracing::warn!(id = %product.id, "failed to reseed product: {e}");
                }
            }
            for item in &defaults.archive_items {
                if let Err(e) = repo.put_archive_item(item).await {
                    tracing::warn!(id = %item.id, "failed to reseed archive entry: {e}");
                }
            }
            if let Err(e) = repo.put_settings(&SettingsPatch::full(&defaults)).await {
                tracing::warn!("failed to reset settings document: {e}");
            }
        }

        self.save_cache();
        tracing::info!("site content reset to defaults");
    }

    /// Delete every remote entry, preferring the store's own id list over
    /// the pre-reset snapshot (the store may hold entries this process never
    /// saw).
    async fn clear_remote_collections(&self, repo: &dyn ContentRepository, previous: &SiteContent) {
        let product_ids: Vec<ProductId> = match repo.list_products().await {
            Ok(remote) => remote.into_iter().map(|p| p.id).collect(),
            Err(e) => {
                tracing::warn!("could not list products for reset, using local ids: {e}");
                previous.products.iter().map(|p| p.id.clone()).collect()
            }
        };
        for id in &product_ids {
            if let Err(e) = repo.delete_product(id).await {
                tracing::warn!(%id, "failed to delete product during reset: {e}");
            }
        }

        let archive_ids: Vec<ArchiveItemId> = match repo.list_archive_items().await {
            Ok(remote) => remote.into_iter().map(|i| i.id).collect(),
            Err(e) => {
                tracing::warn!("could not list archive for reset, using local ids: {e}");
                previous.archive_items.iter().map(|i| i.id.clone()).collect()
            }
        };
        for id in &archive_ids {
            if let Err(e) = repo.delete_archive_item(id).await {
                tracing::warn!(%id, "failed to delete archive entry during reset: {e}");
            }
        }
    }

    /// Flush the cache one last time.
    pub fn dispose(&self) {
        self.save_cache();
        tracing::info!("content facade disposed");
    }

    /// Mutate the snapshot under the write lock and notify subscribers.
    fn apply(&self, mutate: impl FnOnce(&mut SiteContent)) {
        let snapshot = {
            let mut state = self.inner.state.write().expect("content state lock");
            mutate(&mut state);
            state.clone()
        };
        self.inner.watch_tx.send_replace(snapshot);
    }

    async fn persist_settings(&self, patch: SettingsPatch) {
        if let Some(repo) = &self.inner.repo {
            if let Err(e) = repo.put_settings(&patch).await {
                tracing::warn!("settings write failed, keeping optimistic value: {e}");
            }
        }
        self.save_cache();
    }

    fn save_cache(&self) {
        if let Some(cache) = &self.inner.cache {
            if let Err(e) = cache.save(&self.content()) {
                tracing::warn!("failed to persist content cache: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::ContentError;
    use crate::memory::MemoryRepository;
    use crate::repository::SettingsDoc;
    use pixelpunk_core::ItemStatus;

    /// A store where every call fails, as when the network is down.
    struct FailingRepository;

    fn unavailable() -> ContentError {
        ContentError::Api {
            status: 503,
            message: "store unavailable".to_string(),
        }
    }

    #[async_trait]
    impl ContentRepository for FailingRepository {
        async fn connect(&self) -> Result<(), ContentError> {
            Err(unavailable())
        }
        async fn fetch_settings(&self) -> Result<Option<SettingsDoc>, ContentError> {
            Err(unavailable())
        }
        async fn put_settings(&self, _patch: &SettingsPatch) -> Result<(), ContentError> {
            Err(unavailable())
        }
        async fn list_products(&self) -> Result<Vec<Product>, ContentError> {
            Err(unavailable())
        }
        async fn put_product(&self, _product: &Product) -> Result<(), ContentError> {
            Err(unavailable())
        }
        async fn delete_product(&self, _id: &ProductId) -> Result<(), ContentError> {
            Err(unavailable())
        }
        async fn list_archive_items(&self) -> Result<Vec<ArchiveItem>, ContentError> {
            Err(unavailable())
        }
        async fn put_archive_item(&self, _item: &ArchiveItem) -> Result<(), ContentError> {
            Err(unavailable())
        }
        async fn delete_archive_item(&self, _id: &ArchiveItemId) -> Result<(), ContentError> {
            Err(unavailable())
        }
    }

    fn test_product(id: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("TEST PIECE {id}"),
            price: pixelpunk_core::DisplayPrice::new("$99"),
            status: ItemStatus::Available,
            category: "Tops".to_string(),
            image_url: String::new(),
            provenance: String::new(),
            details: Vec::new(),
            carbon_saved: "0.5kg".to_string(),
            era: "MODERN_HYBRID".to_string(),
        }
    }

    #[tokio::test]
    async fn test_offline_service_serves_defaults() {
        let service = ContentService::new(None, None);
        service.init().await;

        assert_eq!(service.content(), default_content());
        assert!(!service.is_loading());
    }

    #[tokio::test]
    async fn test_failing_remote_falls_back_to_defaults() {
        let service = ContentService::new(Some(Arc::new(FailingRepository)), None);
        assert!(service.is_loading());

        service.init().await;

        assert_eq!(service.content(), default_content());
        assert!(!service.is_loading());
    }

    #[tokio::test]
    async fn test_mutations_survive_failing_remote() {
        let service = ContentService::new(Some(Arc::new(FailingRepository)), None);
        service.init().await;

        let hero = HeroContent {
            slogan: "NEW SLOGAN".to_string(),
            title: "New Title".to_string(),
            subtitle: "New subtitle.".to_string(),
        };
        service.update_hero(hero.clone()).await;
        service.upsert_product(test_product("PX-500")).await;

        let content = service.content();
        assert_eq!(content.hero, hero);
        assert!(content.product(&ProductId::new("PX-500")).is_some());
    }

    #[tokio::test]
    async fn test_init_seeds_empty_remote() {
        let repo = Arc::new(MemoryRepository::new());
        let service = ContentService::new(Some(repo.clone()), None);
        service.init().await;

        assert_eq!(repo.product_count(), default_content().products.len());
        assert_eq!(repo.archive_count(), default_content().archive_items.len());
        let settings = repo.fetch_settings().await.expect("fetch").expect("seeded");
        assert_eq!(settings.hero, default_content().hero);
    }

    #[tokio::test]
    async fn test_init_remote_overrides_local() {
        let repo = Arc::new(MemoryRepository::new());
        repo.put_product(&test_product("PX-700")).await.expect("put");
        repo.put_settings(&SettingsPatch {
            marquee: Some(vec!["REMOTE MARQUEE".to_string()]),
            ..SettingsPatch::default()
        })
        .await
        .expect("settings");

        let service = ContentService::new(Some(repo), None);
        service.init().await;

        let content = service.content();
        assert_eq!(content.products.len(), 1);
        assert!(content.product(&ProductId::new("PX-700")).is_some());
        assert_eq!(content.marquee, vec!["REMOTE MARQUEE".to_string()]);
    }

    #[tokio::test]
    async fn test_writes_reach_the_store() {
        let repo = Arc::new(MemoryRepository::new());
        let service = ContentService::new(Some(repo.clone()), None);
        service.init().await;

        service.upsert_product(test_product("PX-900")).await;
        assert_eq!(repo.product_count(), default_content().products.len() + 1);

        service.delete_product(&ProductId::new("PX-900")).await;
        assert_eq!(repo.product_count(), default_content().products.len());
    }

    #[tokio::test]
    async fn test_reset_restores_defaults_everywhere() {
        let repo = Arc::new(MemoryRepository::new());
        let service = ContentService::new(Some(repo.clone()), None);
        service.init().await;

        service.upsert_product(test_product("PX-901")).await;
        service.delete_product(&ProductId::new("PX-001")).await;
        service
            .update_marquee(vec!["SOMETHING ELSE".to_string()])
            .await;

        service.reset_to_defaults().await;

        assert_eq!(service.content(), default_content());
        assert_eq!(repo.product_count(), default_content().products.len());
        let settings = repo.fetch_settings().await.expect("fetch").expect("present");
        assert_eq!(settings.marquee, default_content().marquee);
    }

    #[tokio::test]
    async fn test_reset_after_remote_failure_still_resets_memory() {
        let service = ContentService::new(Some(Arc::new(FailingRepository)), None);
        service.init().await;

        service.upsert_product(test_product("PX-902")).await;
        service.reset_to_defaults().await;

        assert_eq!(service.content(), default_content());
    }

    #[tokio::test]
    async fn test_subscribe_observes_mutations() {
        let service = ContentService::new(None, None);
        service.init().await;
        let mut rx = service.subscribe();

        service
            .update_fomo(vec!["A watcher saw this.".to_string()])
            .await;

        assert!(rx.has_changed().expect("sender alive"));
        let seen = rx.borrow_and_update().clone();
        assert_eq!(seen.fomo_messages, vec!["A watcher saw this.".to_string()]);
    }

    #[tokio::test]
    async fn test_cache_fast_path_and_flush() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cache_path = dir.path().join(crate::cache::DEFAULT_CACHE_FILE);

        {
            let service =
                ContentService::new(None, Some(LocalCache::new(cache_path.clone())));
            service.init().await;
            service.upsert_product(test_product("PX-CACHED")).await;
            service.dispose();
        }

        let service = ContentService::new(None, Some(LocalCache::new(cache_path)));
        assert!(
            service
                .content()
                .product(&ProductId::new("PX-CACHED"))
                .is_some()
        );
    }
}
