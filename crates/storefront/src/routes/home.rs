//! Home page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use rand::seq::IndexedRandom;
use tracing::instrument;

use pixelpunk_core::{ArchiveItem, HeroContent, Product};

use crate::filters;
use crate::state::AppState;

/// Vault card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub sold: bool,
    pub category: String,
    pub image_url: String,
    pub era: String,
    pub carbon_saved: String,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.to_string(),
            sold: !product.status.is_available(),
            category: product.category.clone(),
            image_url: product.image_url.clone(),
            era: product.era.clone(),
            carbon_saved: product.carbon_saved.clone(),
        }
    }
}

/// Archive entry display data for templates.
#[derive(Clone)]
pub struct ArchiveCardView {
    pub title: String,
    pub image_url: String,
    pub description: String,
    pub date: String,
    pub tags: Vec<String>,
}

impl From<&ArchiveItem> for ArchiveCardView {
    fn from(item: &ArchiveItem) -> Self {
        Self {
            title: item.title.clone(),
            image_url: item.image_url.clone(),
            description: item.description.clone(),
            date: item.date.clone(),
            tags: item.tags.clone(),
        }
    }
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub hero: HeroContent,
    pub marquee: Vec<String>,
    pub products: Vec<ProductCardView>,
    pub archive_items: Vec<ArchiveCardView>,
    pub curator_enabled: bool,
}

/// FOMO ticker fragment template (for HTMX polling).
#[derive(Template, WebTemplate)]
#[template(path = "partials/fomo.html")]
pub struct FomoTemplate {
    pub message: Option<String>,
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let content = state.content().content();

    HomeTemplate {
        hero: content.hero.clone(),
        marquee: content.marquee.clone(),
        products: content.products.iter().map(ProductCardView::from).collect(),
        archive_items: content
            .archive_items
            .iter()
            .map(ArchiveCardView::from)
            .collect(),
        curator_enabled: state.curator().is_some(),
    }
}

/// Serve one random FOMO message (HTMX polls this every few seconds).
#[instrument(skip(state))]
pub async fn fomo(State(state): State<AppState>) -> impl IntoResponse {
    let pool = state.content().content().fomo_messages;
    let message = pool.choose(&mut rand::rng()).cloned();
    FomoTemplate { message }
}
