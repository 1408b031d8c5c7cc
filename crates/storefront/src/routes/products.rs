//! Vault piece route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tower_sessions::Session;
use tracing::instrument;

use pixelpunk_core::{Product, ProductId};

use crate::cart;
use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// Full piece display data for the detail page and quick view.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub sold: bool,
    pub category: String,
    pub image_url: String,
    pub provenance: String,
    pub details: Vec<String>,
    pub carbon_saved: String,
    pub era: String,
    pub in_cart: bool,
}

impl ProductDetailView {
    fn new(product: &Product, in_cart: bool) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.to_string(),
            sold: !product.status.is_available(),
            category: product.category.clone(),
            image_url: product.image_url.clone(),
            provenance: product.provenance.clone(),
            details: product.details.clone(),
            carbon_saved: product.carbon_saved.clone(),
            era: product.era.clone(),
            in_cart,
        }
    }
}

/// Piece detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetailView,
}

/// Quick view fragment template (for HTMX modals).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_quick_view.html")]
pub struct ProductQuickViewTemplate {
    pub product: ProductDetailView,
}

/// Display a piece's detail page.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let product_id = ProductId::new(id);
    let content = state.content().content();
    let product = content
        .product(&product_id)
        .ok_or_else(|| AppError::NotFound(product_id.to_string()))?;

    let cart = cart::load_cart(&session).await;

    Ok(ProductShowTemplate {
        product: ProductDetailView::new(product, cart.contains(&product_id)),
    })
}

/// Quick view fragment (HTMX).
#[instrument(skip(state, session))]
pub async fn quick_view(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let product_id = ProductId::new(id);
    let content = state.content().content();
    let product = content
        .product(&product_id)
        .ok_or_else(|| AppError::NotFound(product_id.to_string()))?;

    let cart = cart::load_cart(&session).await;

    Ok(ProductQuickViewTemplate {
        product: ProductDetailView::new(product, cart.contains(&product_id)),
    })
}
