//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                         - Home page (hero, marquee, vault, archive)
//! GET  /health                   - Liveness check
//! GET  /health/ready             - Readiness (content facade synced)
//! GET  /fomo                     - FOMO ticker fragment (HTMX polling)
//!
//! # Vault
//! GET  /products/{id}            - Piece detail page
//! GET  /products/{id}/quick-view - Quick view fragment (HTMX)
//!
//! # Cart (HTMX fragments)
//! GET  /cart                     - Cart page
//! POST /cart/add                 - Add piece (returns cart panel fragment)
//! POST /cart/remove              - Remove piece (returns cart panel fragment)
//! GET  /cart/count               - Cart count badge (fragment)
//!
//! # Policies
//! GET  /pages/{slug}             - Policy page (authenticity, shipping, ...)
//!
//! # Curator (public AI features)
//! POST /curator/analyze          - Garment photo analysis (fragment)
//! GET  /curator/live             - Live voice session (WebSocket)
//!
//! # Admin (session-gated)
//! GET  /admin/login              - Login page
//! POST /admin/login              - Login action
//! POST /admin/logout             - Logout action
//! GET  /admin                    - Editor dashboard
//! POST /admin/content/hero       - Update hero copy
//! POST /admin/content/marquee    - Update marquee strings
//! POST /admin/content/fomo       - Update FOMO pool
//! POST /admin/products           - Upsert product
//! POST /admin/products/{id}/delete - Delete product
//! POST /admin/archive            - Upsert archive entry
//! POST /admin/archive/{id}/delete  - Delete archive entry
//! POST /admin/reset              - Reset content to defaults (confirmed)
//! POST /admin/media/upload       - Upload an asset to the media CDN
//! POST /admin/concept            - Generate a concept render (fragment)
//! ```

pub mod admin;
pub mod cart;
pub mod curator;
pub mod home;
pub mod pages;
pub mod products;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(products::show))
        .route("/{id}/quick-view", get(products::quick_view))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the curator routes router.
pub fn curator_routes() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(curator::analyze))
        .route("/live", get(curator::live))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::dashboard))
        .route("/login", get(admin::login_page).post(admin::login))
        .route("/logout", post(admin::logout))
        .route("/content/hero", post(admin::update_hero))
        .route("/content/marquee", post(admin::update_marquee))
        .route("/content/fomo", post(admin::update_fomo))
        .route("/products", post(admin::upsert_product))
        .route("/products/{id}/delete", post(admin::delete_product))
        .route("/archive", post(admin::upsert_archive_item))
        .route("/archive/{id}/delete", post(admin::delete_archive_item))
        .route("/reset", post(admin::reset))
        .route("/media/upload", post(admin::upload_media))
        .route("/concept", post(admin::generate_concept))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .route("/fomo", get(home::fomo))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .route("/pages/{slug}", get(pages::show))
        .nest("/curator", curator_routes())
        .nest("/admin", admin_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Ready once the content facade has finished its initial sync attempt
/// (successful or not - the site serves cached/default content either way).
async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.content().is_loading() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}
