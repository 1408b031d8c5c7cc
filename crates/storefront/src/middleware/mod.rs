//! Middleware for sessions and the admin gate.

pub mod auth;
pub mod session;

pub use auth::RequireAdmin;
pub use session::create_session_layer;
