//! The editable site content document.

use serde::{Deserialize, Serialize};

use super::archive::ArchiveItem;
use super::id::{ArchiveItemId, ProductId};
use super::product::Product;

/// Hero section copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroContent {
    pub slogan: String,
    pub title: String,
    pub subtitle: String,
}

/// The complete editable content of the site.
///
/// This is the process-wide singleton held by the content facade: constructed
/// from [`crate::defaults::default_content`] at startup, overlaid with
/// persisted and remote state, and mutated only through the facade's update
/// operations.
///
/// Invariant: `products` and `archive_items` entries have globally unique
/// ids; upserts are keyed on `id` (replace in place if present, else
/// prepend).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    pub hero: HeroContent,
    pub marquee: Vec<String>,
    pub fomo_messages: Vec<String>,
    pub products: Vec<Product>,
    pub archive_items: Vec<ArchiveItem>,
}

impl SiteContent {
    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Look up an archive entry by id.
    #[must_use]
    pub fn archive_item(&self, id: &ArchiveItemId) -> Option<&ArchiveItem> {
        self.archive_items.iter().find(|i| &i.id == id)
    }

    /// Replace the product with the same id, or prepend if absent.
    pub fn upsert_product(&mut self, product: Product) {
        match self.products.iter_mut().find(|p| p.id == product.id) {
            Some(slot) => *slot = product,
            None => self.products.insert(0, product),
        }
    }

    /// Remove the product with the given id, if present.
    pub fn delete_product(&mut self, id: &ProductId) {
        self.products.retain(|p| &p.id != id);
    }

    /// Replace the archive entry with the same id, or prepend if absent.
    pub fn upsert_archive_item(&mut self, item: ArchiveItem) {
        match self.archive_items.iter_mut().find(|i| i.id == item.id) {
            Some(slot) => *slot = item,
            None => self.archive_items.insert(0, item),
        }
    }

    /// Remove the archive entry with the given id, if present.
    pub fn delete_archive_item(&mut self, id: &ArchiveItemId) {
        self.archive_items.retain(|i| &i.id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::default_content;
    use crate::types::{DisplayPrice, ItemStatus};

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price: DisplayPrice::new("$100"),
            status: ItemStatus::Available,
            category: "Tops".to_string(),
            image_url: String::new(),
            provenance: String::new(),
            details: Vec::new(),
            carbon_saved: "1.0kg".to_string(),
            era: "MODERN_HYBRID".to_string(),
        }
    }

    #[test]
    fn test_upsert_prepends_new_products() {
        let mut content = default_content();
        let count = content.products.len();

        content.upsert_product(product("PX-900", "NEW PIECE"));

        assert_eq!(content.products.len(), count + 1);
        assert_eq!(
            content.products.first().map(|p| p.id.as_str()),
            Some("PX-900")
        );
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let mut content = default_content();
        let count = content.products.len();

        content.upsert_product(product("PX-001", "RENAMED"));

        assert_eq!(content.products.len(), count);
        let renamed = content.product(&ProductId::new("PX-001")).expect("present");
        assert_eq!(renamed.name, "RENAMED");
    }

    #[test]
    fn test_upsert_delete_sequences_keep_ids_unique() {
        let mut content = default_content();
        content.products.clear();

        // Arbitrary sequence over three ids; the list must end with exactly
        // one entry per surviving id, reflecting the last upsert.
        content.upsert_product(product("A", "a1"));
        content.upsert_product(product("B", "b1"));
        content.upsert_product(product("A", "a2"));
        content.upsert_product(product("C", "c1"));
        content.delete_product(&ProductId::new("B"));
        content.upsert_product(product("C", "c2"));

        let mut ids: Vec<&str> = content.products.iter().map(|p| p.id.as_str()).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec!["A", "C"]);
        assert_eq!(
            content.product(&ProductId::new("A")).map(|p| p.name.as_str()),
            Some("a2")
        );
        assert_eq!(
            content.product(&ProductId::new("C")).map(|p| p.name.as_str()),
            Some("c2")
        );
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let mut content = default_content();
        let count = content.products.len();
        content.delete_product(&ProductId::new("PX-999"));
        assert_eq!(content.products.len(), count);
    }
}
