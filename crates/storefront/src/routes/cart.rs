//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the session (see [`crate::cart`]); these
//! handlers translate between forms, the session, and fragments.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use pixelpunk_core::{Product, ProductId};

use crate::cart::{AddOutcome, Cart, load_cart, save_cart};
use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub category: String,
    pub image_url: String,
    pub era: String,
}

impl From<&Product> for CartItemView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.to_string(),
            category: product.category.clone(),
            image_url: product.image_url.clone(),
            era: product.era.clone(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: usize,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            subtotal: cart.subtotal_display(),
            item_count: cart.len(),
        }
    }
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
}

/// Cart panel fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: usize,
}

/// Add/remove form data.
#[derive(Debug, Deserialize)]
pub struct CartItemForm {
    pub product_id: String,
}

/// Display the cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    CartShowTemplate {
        cart: CartView::from(&cart),
    }
}

/// Add a piece to the cart (HTMX).
///
/// Idempotent on id. Either way the response opens the cart panel via an
/// HTMX trigger, matching the original behavior where re-adding a piece
/// just re-opened the cart.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CartItemForm>,
) -> Result<Response> {
    let product_id = ProductId::new(form.product_id);
    let mut cart = load_cart(&session).await;

    let outcome = match state.content().content().product(&product_id) {
        Some(product) => cart.add(product.clone()),
        None => {
            tracing::warn!(%product_id, "add-to-cart for unknown piece");
            AddOutcome::Unavailable
        }
    };

    if outcome == AddOutcome::Added {
        save_cart(&session, &cart).await?;
    }

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated, cart-open")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response())
}

/// Remove a piece from the cart (HTMX).
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<CartItemForm>) -> Result<Response> {
    let product_id = ProductId::new(form.product_id);
    let mut cart = load_cart(&session).await;
    cart.remove(&product_id);
    save_cart(&session, &cart).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::from(&cart),
        },
    )
        .into_response())
}

/// Get the cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    CartCountTemplate { count: cart.len() }
}
