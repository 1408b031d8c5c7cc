//! Admin editor route handlers.
//!
//! Everything behind the operator gate: the content editor (hero, marquee,
//! FOMO pool, vault, archive), media uploads, concept generation, and the
//! destructive reset. Mutations go through the content facade and are
//! optimistic - the handlers redirect back to the dashboard immediately and
//! persistence failures surface only in the logs, exactly as the facade
//! documents.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use uuid::Uuid;

use pixelpunk_core::{
    ArchiveItem, ArchiveItemId, DisplayPrice, HeroContent, ItemStatus, Product, ProductId,
};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::middleware::auth::{clear_admin, set_admin};
use crate::services::auth::{AuthError, verify_admin_password};
use crate::state::AppState;

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct AdminLoginTemplate {
    pub error: Option<String>,
}

/// Product row display data for the dashboard.
#[derive(Clone)]
pub struct AdminProductRow {
    pub id: String,
    pub name: String,
    pub price: String,
    pub status: String,
    pub category: String,
}

/// Archive row display data for the dashboard.
#[derive(Clone)]
pub struct AdminArchiveRow {
    pub id: String,
    pub title: String,
    pub date: String,
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct AdminDashboardTemplate {
    pub hero: HeroContent,
    pub marquee_text: String,
    pub fomo_text: String,
    pub products: Vec<AdminProductRow>,
    pub archive_items: Vec<AdminArchiveRow>,
    pub media_enabled: bool,
    pub curator_enabled: bool,
    pub loading: bool,
}

/// Upload result fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/admin_upload.html")]
pub struct UploadResultTemplate {
    pub secure_url: String,
    pub public_id: String,
}

/// Concept render fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/admin_concept.html")]
pub struct ConceptResultTemplate {
    pub data_uri: String,
}

// =============================================================================
// Forms
// =============================================================================

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Hero form data.
#[derive(Debug, Deserialize)]
pub struct HeroForm {
    pub slogan: String,
    pub title: String,
    pub subtitle: String,
}

/// Line-list form data (marquee, FOMO pool): one entry per line.
#[derive(Debug, Deserialize)]
pub struct LinesForm {
    pub lines: String,
}

impl LinesForm {
    fn entries(&self) -> Vec<String> {
        self.lines
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    }
}

/// Product upsert form data.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    /// Empty for a new piece; an id is assigned on save.
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub price: String,
    pub status: String,
    pub category: String,
    pub image_url: String,
    pub provenance: String,
    /// One detail bullet per line.
    #[serde(default)]
    pub details: String,
    pub carbon_saved: String,
    pub era: String,
}

/// Archive entry upsert form data.
#[derive(Debug, Deserialize)]
pub struct ArchiveForm {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub image_url: String,
    pub description: String,
    pub date: String,
    /// Comma-separated tags.
    #[serde(default)]
    pub tags: String,
}

/// Reset confirmation form data.
#[derive(Debug, Deserialize)]
pub struct ResetForm {
    /// Must spell `RESET`; the dashboard makes the operator type it.
    pub confirm: String,
}

/// Concept generation form data.
#[derive(Debug, Deserialize)]
pub struct ConceptForm {
    pub prompt: String,
}

// =============================================================================
// Auth handlers
// =============================================================================

/// Display the login page.
#[instrument]
pub async fn login_page() -> impl IntoResponse {
    AdminLoginTemplate { error: None }
}

/// Verify the operator password and set the admin flag.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    match verify_admin_password(&state.config().admin.password_hash, &form.password) {
        Ok(()) => {
            set_admin(&session).await?;
            tracing::info!("admin login");
            Ok(Redirect::to("/admin").into_response())
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("admin login rejected");
            Ok(AdminLoginTemplate {
                error: Some("ACCESS DENIED. Invalid credentials.".to_string()),
            }
            .into_response())
        }
        Err(AuthError::InvalidHash(e)) => Err(AppError::Internal(e)),
    }
}

/// Clear the admin flag and return to the storefront.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Response> {
    clear_admin(&session).await?;
    Ok(Redirect::to("/").into_response())
}

// =============================================================================
// Editor handlers
// =============================================================================

/// Display the editor dashboard.
#[instrument(skip(state))]
pub async fn dashboard(_admin: RequireAdmin, State(state): State<AppState>) -> impl IntoResponse {
    let content = state.content().content();

    AdminDashboardTemplate {
        hero: content.hero.clone(),
        marquee_text: content.marquee.join("\n"),
        fomo_text: content.fomo_messages.join("\n"),
        products: content
            .products
            .iter()
            .map(|p| AdminProductRow {
                id: p.id.to_string(),
                name: p.name.clone(),
                price: p.price.to_string(),
                status: p.status.to_string(),
                category: p.category.clone(),
            })
            .collect(),
        archive_items: content
            .archive_items
            .iter()
            .map(|i| AdminArchiveRow {
                id: i.id.to_string(),
                title: i.title.clone(),
                date: i.date.clone(),
            })
            .collect(),
        media_enabled: state.media().is_some(),
        curator_enabled: state.curator().is_some(),
        loading: state.content().is_loading(),
    }
}

/// Update the hero copy.
#[instrument(skip(state, form))]
pub async fn update_hero(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<HeroForm>,
) -> Redirect {
    state
        .content()
        .update_hero(HeroContent {
            slogan: form.slogan,
            title: form.title,
            subtitle: form.subtitle,
        })
        .await;
    Redirect::to("/admin")
}

/// Update the marquee strings.
#[instrument(skip(state, form))]
pub async fn update_marquee(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<LinesForm>,
) -> Redirect {
    state.content().update_marquee(form.entries()).await;
    Redirect::to("/admin")
}

/// Update the FOMO notification pool.
#[instrument(skip(state, form))]
pub async fn update_fomo(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<LinesForm>,
) -> Redirect {
    state.content().update_fomo(form.entries()).await;
    Redirect::to("/admin")
}

/// Upsert a vault piece.
#[instrument(skip(state, form))]
pub async fn upsert_product(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let status = form
        .status
        .parse::<ItemStatus>()
        .map_err(AppError::BadRequest)?;

    let id = if form.id.trim().is_empty() {
        ProductId::new(generate_entry_id("PX"))
    } else {
        ProductId::new(form.id.trim())
    };

    let product = Product {
        id,
        name: form.name,
        price: DisplayPrice::new(form.price),
        status,
        category: form.category,
        image_url: form.image_url,
        provenance: form.provenance,
        details: form
            .details
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToOwned::to_owned)
            .collect(),
        carbon_saved: form.carbon_saved,
        era: form.era,
    };

    state.content().upsert_product(product).await;
    Ok(Redirect::to("/admin"))
}

/// Delete a vault piece.
#[instrument(skip(state))]
pub async fn delete_product(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Redirect {
    state.content().delete_product(&ProductId::new(id)).await;
    Redirect::to("/admin")
}

/// Upsert an archive entry.
#[instrument(skip(state, form))]
pub async fn upsert_archive_item(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<ArchiveForm>,
) -> Redirect {
    let id = if form.id.trim().is_empty() {
        ArchiveItemId::new(generate_entry_id("arch"))
    } else {
        ArchiveItemId::new(form.id.trim())
    };

    let item = ArchiveItem {
        id,
        title: form.title,
        image_url: form.image_url,
        description: form.description,
        date: form.date,
        tags: form
            .tags
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(ToOwned::to_owned)
            .collect(),
    };

    state.content().upsert_archive_item(item).await;
    Redirect::to("/admin")
}

/// Delete an archive entry.
#[instrument(skip(state))]
pub async fn delete_archive_item(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Redirect {
    state
        .content()
        .delete_archive_item(&ArchiveItemId::new(id))
        .await;
    Redirect::to("/admin")
}

/// Reset all site content to the built-in defaults.
///
/// Destructive; requires the operator to have typed the confirmation word.
#[instrument(skip(state, form))]
pub async fn reset(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<ResetForm>,
) -> Result<Redirect> {
    if form.confirm.trim() != "RESET" {
        return Err(AppError::BadRequest(
            "type RESET to confirm wiping all content".to_string(),
        ));
    }
    state.content().reset_to_defaults().await;
    Ok(Redirect::to("/admin"))
}

/// Upload an asset to the media CDN (HTMX fragment).
#[instrument(skip(state, multipart))]
pub async fn upload_media(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response> {
    let Some(media) = state.media() else {
        return Err(AppError::BadRequest(
            "media uploads are not configured".to_string(),
        ));
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_owned();
        let mime_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_owned();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        let upload = media.upload(&file_name, &mime_type, bytes.to_vec()).await?;

        return Ok(UploadResultTemplate {
            secure_url: upload.secure_url,
            public_id: upload.public_id,
        }
        .into_response());
    }

    Err(AppError::BadRequest("no file field in upload".to_string()))
}

/// Generate an editorial concept render (HTMX fragment).
#[instrument(skip(state, form))]
pub async fn generate_concept(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<ConceptForm>,
) -> Result<Response> {
    let Some(curator) = state.curator() else {
        return Err(AppError::BadRequest(
            "the curator is not configured".to_string(),
        ));
    };

    let data_uri = curator.generate_concept(&form.prompt).await?;
    Ok(ConceptResultTemplate { data_uri }.into_response())
}

/// Mint an entry id: a prefix plus a short random suffix.
fn generate_entry_id(prefix: &str) -> String {
    let raw = Uuid::new_v4().simple().to_string();
    let suffix = raw.get(..6).unwrap_or("000000").to_uppercase();
    format!("{prefix}-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_form_splits_and_trims() {
        let form = LinesForm {
            lines: "first line\n  second line  \n\n\nthird".to_string(),
        };
        assert_eq!(
            form.entries(),
            vec![
                "first line".to_string(),
                "second line".to_string(),
                "third".to_string()
            ]
        );
    }

    #[test]
    fn test_generated_ids_carry_prefix() {
        let id = generate_entry_id("PX");
        assert!(id.starts_with("PX-"));
        assert_eq!(id.len(), "PX-".len() + 6);

        let other = generate_entry_id("PX");
        assert_ne!(id, other);
    }

    #[test]
    fn test_login_form_debug_redacts_password() {
        let form = LoginForm {
            password: "vault-operator-9".to_string(),
        };
        let debug_output = format!("{form:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("vault-operator-9"));
    }
}
