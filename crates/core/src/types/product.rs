//! Archive vault products.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::DisplayPrice;
use super::status::ItemStatus;

/// A one-of-one piece in the vault.
///
/// Created and edited only through the admin editor. The `id` is the stable,
/// external-facing reference used for upserts, deletes, and cart membership.
/// Field names serialize in camelCase to match the content store documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: DisplayPrice,
    pub status: ItemStatus,
    pub category: String,
    pub image_url: String,
    /// Free-text sourcing story shown on the detail panel.
    pub provenance: String,
    /// Short bullet points (fabric, fit, hardware).
    pub details: Vec<String>,
    /// Display string, e.g. `"12.4kg"`.
    pub carbon_saved: String,
    /// Era tag, e.g. `"1980S_RECOVERED"`.
    pub era: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_camel_case() {
        let product = Product {
            id: ProductId::new("PX-001"),
            name: "HYBRID BLAZER // ARCHIVE-01".to_string(),
            price: DisplayPrice::new("$240"),
            status: ItemStatus::Available,
            category: "Outerwear".to_string(),
            image_url: "https://example.com/blazer.jpg".to_string(),
            provenance: "Found in Berlin.".to_string(),
            details: vec!["Heavy structured wool".to_string()],
            carbon_saved: "12.4kg".to_string(),
            era: "VINTAGE_BASE".to_string(),
        };

        let json = serde_json::to_string(&product).expect("serialize");
        assert!(json.contains("\"imageUrl\""));
        assert!(json.contains("\"carbonSaved\""));
        assert!(!json.contains("image_url"));

        let back: Product = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, product);
    }
}
