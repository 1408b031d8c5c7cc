//! Integration tests for PixelPunk Archive.
//!
//! The storefront router is driven in-process with `tower::ServiceExt` -
//! no network, no hosted services. The content facade runs against its
//! built-in defaults (or an injected in-memory repository), which is exactly
//! the offline mode the site must support.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pixelpunk-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::IpAddr;
use std::path::PathBuf;

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use secrecy::SecretString;
use tower::ServiceExt;

use pixelpunk_content::ContentService;
use pixelpunk_storefront::config::{AdminConfig, StorefrontConfig};
use pixelpunk_storefront::state::AppState;

/// The operator password every test context accepts.
pub const TEST_ADMIN_PASSWORD: &str = "vault-operator-9";

/// An in-process storefront with its session store and content facade.
pub struct TestContext {
    pub app: Router,
    pub state: AppState,
}

impl TestContext {
    /// Build a storefront running offline from the built-in defaults.
    ///
    /// # Panics
    ///
    /// Panics if password hashing fails (test setup defect).
    #[must_use]
    pub fn new() -> Self {
        let content = ContentService::new(None, None);
        Self::with_content(content)
    }

    /// Build a storefront around a prepared content facade.
    #[must_use]
    pub fn with_content(content: ContentService) -> Self {
        let state = AppState::with_content(test_config(), content);
        let app = pixelpunk_storefront::app(state.clone());
        Self { app, state }
    }

    /// Issue one request against the router.
    ///
    /// # Panics
    ///
    /// Panics if the router fails infallibly (it cannot).
    pub async fn request(&self, request: Request<Body>) -> Response<Body> {
        self.app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for an offline test storefront.
///
/// # Panics
///
/// Panics if password hashing fails.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    let salt = SaltString::from_b64("c2FsdHNhbHRzYWx0c2FsdA").expect("salt");
    let password_hash = Argon2::default()
        .hash_password(TEST_ADMIN_PASSWORD.as_bytes(), &salt)
        .expect("hash")
        .to_string();

    StorefrontConfig {
        host: "127.0.0.1".parse::<IpAddr>().expect("addr"),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        data_dir: PathBuf::from("./data"),
        admin: AdminConfig {
            password_hash: SecretString::from(password_hash),
        },
        remote_store: None,
        media: None,
        curator: None,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// Build a GET request, with an optional session cookie.
///
/// # Panics
///
/// Panics if the request is malformed (test defect).
#[must_use]
pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("request")
}

/// Build a form POST request, with an optional session cookie.
///
/// # Panics
///
/// Panics if the request is malformed (test defect).
#[must_use]
pub fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_owned())).expect("request")
}

/// Extract the session cookie pair (`name=value`) from a response.
#[must_use]
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| raw.split(';').next())
        .map(ToOwned::to_owned)
}

/// Read a response body to a string.
///
/// # Panics
///
/// Panics if the body cannot be collected or is not UTF-8.
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("collect body");
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}
