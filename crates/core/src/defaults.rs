//! The built-in default dataset.
//!
//! This is the content the site ships with before an admin edits anything.
//! It is also what `reset_to_defaults` restores and what seeds an empty
//! remote collection on first run.

use crate::types::{
    ArchiveItem, ArchiveItemId, DisplayPrice, HeroContent, ItemStatus, Product, ProductId,
    SiteContent,
};

/// Build the default site content.
#[must_use]
pub fn default_content() -> SiteContent {
    SiteContent {
        hero: HeroContent {
            slogan: "CURATING THE FUTURE ARCHIVE".to_string(),
            title: "Rare Archives. Modern Fits.".to_string(),
            subtitle: "Stop wearing the same things as everyone else. We find unique, \
                       high-quality pieces from the past that look incredible in your closet today."
                .to_string(),
        },
        marquee: vec![
            "LIMITED: Each item is a singular record of history.".to_string(),
            "JOIN THE ARCHIVE: Ownership grants access to private drops.".to_string(),
            "URGENCY: Sold items are removed permanently from the public log.".to_string(),
        ],
        fomo_messages: vec![
            "A collector in Paris just viewed the Hybrid Blazer.".to_string(),
            "Only 1 Archive Tee left in current stock.".to_string(),
            "A styling request was just fulfilled for a client in Tokyo.".to_string(),
            "New curated drops arriving this Friday.".to_string(),
            "Verified: 98.4% of archive items never return after sale.".to_string(),
        ],
        products: default_products(),
        archive_items: default_archive_items(),
    }
}

/// The four pieces the vault opens with.
#[must_use]
pub fn default_products() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::new("PX-001"),
            name: "HYBRID BLAZER // ARCHIVE-01".to_string(),
            price: DisplayPrice::new("$240"),
            status: ItemStatus::Available,
            category: "Outerwear".to_string(),
            image_url:
                "https://images.unsplash.com/photo-1591047139829-d91aecb6caea?q=80&w=800&auto=format&fit=crop"
                    .to_string(),
            provenance: "Found in Berlin. A perfect 90s silhouette that works with modern \
                         tech-wear or casual street fits."
                .to_string(),
            details: vec![
                "Heavy structured wool".to_string(),
                "Oversized modern fit".to_string(),
                "Refurbished original buttons".to_string(),
            ],
            carbon_saved: "12.4kg".to_string(),
            era: "VINTAGE_BASE".to_string(),
        },
        Product {
            id: ProductId::new("PX-002"),
            name: "URBAN COMMAND UTILITY VEST".to_string(),
            price: DisplayPrice::new("$180"),
            status: ItemStatus::Sold,
            category: "Vests".to_string(),
            image_url:
                "https://images.unsplash.com/photo-1551028150-64b9f398f678?q=80&w=800&auto=format&fit=crop"
                    .to_string(),
            provenance: "London Sourcing. A rare find that brings an industrial edge to a \
                         simple hoodie or tee."
                .to_string(),
            details: vec![
                "Multi-functional pockets".to_string(),
                "Water-resistant nylon".to_string(),
                "Adjustable side straps".to_string(),
            ],
            carbon_saved: "8.2kg".to_string(),
            era: "EARLY_2000S".to_string(),
        },
        Product {
            id: ProductId::new("PX-003"),
            name: "LAB-REWORKED OVERSIZED TEE".to_string(),
            price: DisplayPrice::new("$145"),
            status: ItemStatus::Available,
            category: "Tops".to_string(),
            image_url:
                "https://images.unsplash.com/photo-1556821840-3a63f95609a7?q=80&w=800&auto=format&fit=crop"
                    .to_string(),
            provenance: "Customized in-house. We took a heavy 80s cotton blank and gave it a \
                         modern digital-glitch wash."
                .to_string(),
            details: vec![
                "Heavyweight 400gsm cotton".to_string(),
                "One-of-a-kind dye pattern".to_string(),
                "Dropped shoulder fit".to_string(),
            ],
            carbon_saved: "5.1kg".to_string(),
            era: "MODERN_HYBRID".to_string(),
        },
        Product {
            id: ProductId::new("PX-004"),
            name: "ARCHIVE_DENIM // WIDE LEG".to_string(),
            price: DisplayPrice::new("$210"),
            status: ItemStatus::Available,
            category: "Bottoms".to_string(),
            image_url:
                "https://images.unsplash.com/photo-1542272604-787c3835535d?q=80&w=800&auto=format&fit=crop"
                    .to_string(),
            provenance: "Sourced for its incredible natural wash. These are the jeans modern \
                         brands try to copy, but can't."
                .to_string(),
            details: vec![
                "Authentic raw aging".to_string(),
                "Straight wide-leg cut".to_string(),
                "Original reinforced rivets".to_string(),
            ],
            carbon_saved: "15.6kg".to_string(),
            era: "1980S_RECOVERED".to_string(),
        },
    ]
}

/// The three editorial entries the archive log opens with.
#[must_use]
pub fn default_archive_items() -> Vec<ArchiveItem> {
    vec![
        ArchiveItem {
            id: ArchiveItemId::new("arch-01"),
            title: "THE MODERN ARCHIVE".to_string(),
            image_url:
                "https://images.unsplash.com/photo-1523381210434-271e8be1f52b?q=80&w=800&auto=format&fit=crop"
                    .to_string(),
            description: "How to mix 40-year-old fabrics with today's sharpest silhouettes."
                .to_string(),
            date: "NOV 2024".to_string(),
            tags: vec!["MIXING".to_string(), "STYLING".to_string()],
        },
        ArchiveItem {
            id: ArchiveItemId::new("arch-02"),
            title: "STREET ORIGINS".to_string(),
            image_url:
                "https://images.unsplash.com/photo-1515886657613-9f3515b0c78f?q=80&w=800&auto=format&fit=crop"
                    .to_string(),
            description: "Tracking the evolution of utility gear from the factory to the city."
                .to_string(),
            date: "OCT 2024".to_string(),
            tags: vec!["UTILITY".to_string(), "HISTORY".to_string()],
        },
        ArchiveItem {
            id: ArchiveItemId::new("arch-03"),
            title: "DIGITAL FABRIC".to_string(),
            image_url:
                "https://images.unsplash.com/photo-1445205170230-053b83016050?q=80&w=800&auto=format&fit=crop"
                    .to_string(),
            description: "Exploring why vintage textures look so good in high-definition photos."
                .to_string(),
            date: "SEP 2024".to_string(),
            tags: vec!["AESTHETIC".to_string(), "TEXTURE".to_string()],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_default_ids_are_unique() {
        let content = default_content();
        let product_ids: HashSet<_> = content.products.iter().map(|p| p.id.clone()).collect();
        assert_eq!(product_ids.len(), content.products.len());
        let archive_ids: HashSet<_> = content.archive_items.iter().map(|i| i.id.clone()).collect();
        assert_eq!(archive_ids.len(), content.archive_items.len());
    }

    #[test]
    fn test_default_shape() {
        let content = default_content();
        assert_eq!(content.products.len(), 4);
        assert_eq!(content.archive_items.len(), 3);
        assert_eq!(content.marquee.len(), 3);
        assert_eq!(content.fomo_messages.len(), 5);
    }

    #[test]
    fn test_default_prices_parse() {
        for product in default_products() {
            assert!(product.price.amount().is_ok(), "{}", product.id);
        }
    }
}
