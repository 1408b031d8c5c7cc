//! Admin gate middleware and extractors.
//!
//! Provides an extractor for requiring the admin flag in route handlers.
//! The flag is set by the login handler after the password verifies and
//! cleared on logout.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::session_keys;

/// Extractor that requires an authenticated admin session.
///
/// Page requests redirect to the login form; fragment/API requests get a
/// bare 401.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(_admin: RequireAdmin) -> impl IntoResponse {
///     "only the operator sees this"
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RequireAdmin;

/// Error returned when the admin flag is missing.
pub enum AdminRejection {
    /// Redirect to the login page (for HTML page requests).
    RedirectToLogin,
    /// Unauthorized response (for fragment and API requests).
    Unauthorized,
}

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/admin/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminRejection::Unauthorized)?;

        let is_admin = session
            .get::<bool>(session_keys::ADMIN_MODE)
            .await
            .ok()
            .flatten()
            .unwrap_or(false);

        if is_admin {
            Ok(Self)
        } else if parts.method == axum::http::Method::GET {
            Err(AdminRejection::RedirectToLogin)
        } else {
            Err(AdminRejection::Unauthorized)
        }
    }
}

/// Mark the session as admin after a successful login.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::ADMIN_MODE, true).await
}

/// Clear the admin flag (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_admin(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.remove::<bool>(session_keys::ADMIN_MODE).await?;
    Ok(())
}
