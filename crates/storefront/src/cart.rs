//! Session cart.
//!
//! Purely client-side state: a session-scoped list of product snapshots with
//! a derived subtotal. Every piece is one-of-one, so quantities do not exist
//! and adding an id twice is a no-op. The cart dies with the session; there
//! is no checkout processing behind it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use pixelpunk_core::{Product, ProductId};

use crate::models::session_keys;

/// What happened on an add attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The piece is now in the cart.
    Added,
    /// The piece was already there; nothing changed (the panel still opens).
    AlreadyPresent,
    /// The piece is sold and cannot be carted.
    Unavailable,
}

/// The visitor's cart: product snapshots, unique by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.items.iter().any(|p| &p.id == id)
    }

    /// Add a piece. Idempotent on id; sold pieces are refused.
    pub fn add(&mut self, product: Product) -> AddOutcome {
        if !product.status.is_available() {
            return AddOutcome::Unavailable;
        }
        if self.contains(&product.id) {
            return AddOutcome::AlreadyPresent;
        }
        self.items.push(product);
        AddOutcome::Added
    }

    /// Remove a piece by id. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: &ProductId) {
        self.items.retain(|p| &p.id != id);
    }

    /// Sum of the parseable display prices. Display-only, not authoritative.
    ///
    /// Entries whose price string does not parse contribute nothing rather
    /// than poisoning the total.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items
            .iter()
            .filter_map(|p| p.price.amount().ok())
            .sum()
    }

    /// Subtotal formatted for the cart panel, e.g. `"$35.50"`.
    #[must_use]
    pub fn subtotal_display(&self) -> String {
        format!("${:.2}", self.subtotal())
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart from the session, empty if absent or unreadable.
pub async fn load_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Persist the cart back to the session.
///
/// # Errors
///
/// Returns an error if the session store rejects the write.
pub async fn save_cart(
    session: &Session,
    cart: &Cart,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}

#[cfg(test)]
mod tests {
    use pixelpunk_core::{DisplayPrice, ItemStatus};

    use super::*;

    fn product(id: &str, price: &str, status: ItemStatus) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("PIECE {id}"),
            price: DisplayPrice::new(price),
            status,
            category: "Tops".to_string(),
            image_url: String::new(),
            provenance: String::new(),
            details: Vec::new(),
            carbon_saved: "1.0kg".to_string(),
            era: "MODERN_HYBRID".to_string(),
        }
    }

    #[test]
    fn test_add_is_idempotent_on_id() {
        let mut cart = Cart::default();
        assert_eq!(
            cart.add(product("PX-001", "$240", ItemStatus::Available)),
            AddOutcome::Added
        );
        assert_eq!(
            cart.add(product("PX-001", "$240", ItemStatus::Available)),
            AddOutcome::AlreadyPresent
        );
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_remove_then_add_restores_single_entry() {
        let mut cart = Cart::default();
        cart.add(product("PX-001", "$240", ItemStatus::Available));
        cart.remove(&ProductId::new("PX-001"));
        assert!(cart.is_empty());

        cart.add(product("PX-001", "$240", ItemStatus::Available));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_sold_pieces_are_refused() {
        let mut cart = Cart::default();
        assert_eq!(
            cart.add(product("PX-002", "$180", ItemStatus::Sold)),
            AddOutcome::Unavailable
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_subtotal_sums_display_prices() {
        let mut cart = Cart::default();
        cart.add(product("A", "$10", ItemStatus::Available));
        cart.add(product("B", "$25.50", ItemStatus::Available));

        assert_eq!(cart.subtotal(), Decimal::new(3550, 2));
        assert_eq!(cart.subtotal_display(), "$35.50");
    }

    #[test]
    fn test_unparseable_price_does_not_poison_subtotal() {
        let mut cart = Cart::default();
        cart.add(product("A", "$10", ItemStatus::Available));
        cart.add(product("B", "ask us", ItemStatus::Available));

        assert_eq!(cart.subtotal(), Decimal::new(10, 0));
    }

    #[test]
    fn test_remove_absent_id_is_noop() {
        let mut cart = Cart::default();
        cart.add(product("A", "$10", ItemStatus::Available));
        cart.remove(&ProductId::new("Z"));
        assert_eq!(cart.len(), 1);
    }
}
