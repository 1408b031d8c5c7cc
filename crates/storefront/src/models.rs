//! Session-related types and keys.

/// Session keys for visitor and admin state.
pub mod session_keys {
    /// Key for the visitor's cart.
    pub const CART: &str = "cart";

    /// Key for the admin-mode flag, set after a successful login.
    pub const ADMIN_MODE: &str = "admin_mode";
}
