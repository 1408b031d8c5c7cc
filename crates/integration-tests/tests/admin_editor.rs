//! Admin gate and editor flows.

use axum::http::StatusCode;

use pixelpunk_core::ProductId;
use pixelpunk_integration_tests::{
    TEST_ADMIN_PASSWORD, TestContext, body_string, get, post_form, session_cookie,
};

/// Log in and return the admin session cookie.
async fn admin_cookie(ctx: &TestContext) -> String {
    let response = ctx
        .request(post_form(
            "/admin/login",
            &format!("password={TEST_ADMIN_PASSWORD}"),
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    session_cookie(&response).expect("session cookie")
}

#[tokio::test]
async fn dashboard_requires_login() {
    let ctx = TestContext::new();

    let response = ctx.request(get("/admin", None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response
            .headers()
            .get("location")
            .and_then(|v| v.to_str().ok()),
        Some("/admin/login")
    );

    // Mutations without a session get a bare 401.
    let response = ctx
        .request(post_form("/admin/content/marquee", "lines=NOPE", None))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_password_is_rejected_without_session() {
    let ctx = TestContext::new();

    let response = ctx
        .request(post_form("/admin/login", "password=guessing", None))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("ACCESS DENIED"));

    // Still locked out.
    let response = ctx.request(get("/admin", None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn login_grants_dashboard_access() {
    let ctx = TestContext::new();
    let cookie = admin_cookie(&ctx).await;

    let response = ctx.request(get("/admin", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(body.contains("CONTENT EDITOR"));
    assert!(body.contains("PX-001"));
}

#[tokio::test]
async fn hero_edit_shows_up_on_home() {
    let ctx = TestContext::new();
    let cookie = admin_cookie(&ctx).await;

    let response = ctx
        .request(post_form(
            "/admin/content/hero",
            "slogan=NEW+SIGNAL&title=Tomorrow%27s+Archive&subtitle=Fresh+copy.",
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = ctx.request(get("/", None)).await;
    let body = body_string(response).await;
    assert!(body.contains("Tomorrow&#x27;s Archive") || body.contains("Tomorrow's Archive"));
}

#[tokio::test]
async fn product_upsert_and_delete_roundtrip() {
    let ctx = TestContext::new();
    let cookie = admin_cookie(&ctx).await;

    let form = "id=PX-777&name=TEST+PARKA&price=%24310&status=available&category=Outerwear\
                &image_url=https%3A%2F%2Fexample.com%2Fparka.jpg&provenance=Test+sourcing.\
                &details=Warm%0AHeavy&carbon_saved=9.9kg&era=EARLY_2000S";
    let response = ctx
        .request(post_form("/admin/products", form, Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let content = ctx.state.content().content();
    let parka = content
        .product(&ProductId::new("PX-777"))
        .expect("upserted piece");
    assert_eq!(parka.details, vec!["Warm".to_string(), "Heavy".to_string()]);

    // New pieces prepend, so the parka leads the vault grid.
    assert_eq!(
        content.products.first().map(|p| p.id.as_str()),
        Some("PX-777")
    );

    let response = ctx
        .request(post_form(
            "/admin/products/PX-777/delete",
            "",
            Some(&cookie),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(
        ctx.state
            .content()
            .content()
            .product(&ProductId::new("PX-777"))
            .is_none()
    );
}

#[tokio::test]
async fn reset_requires_typed_confirmation() {
    let ctx = TestContext::new();
    let cookie = admin_cookie(&ctx).await;

    // Mutate something first.
    ctx.request(post_form(
        "/admin/content/marquee",
        "lines=ONLY+LINE",
        Some(&cookie),
    ))
    .await;
    assert_eq!(
        ctx.state.content().content().marquee,
        vec!["ONLY LINE".to_string()]
    );

    // Wrong confirmation word: nothing happens.
    let response = ctx
        .request(post_form("/admin/reset", "confirm=reset", Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        ctx.state.content().content().marquee,
        vec!["ONLY LINE".to_string()]
    );

    // Typed confirmation: back to defaults.
    let response = ctx
        .request(post_form("/admin/reset", "confirm=RESET", Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        ctx.state.content().content(),
        pixelpunk_core::defaults::default_content()
    );
}

#[tokio::test]
async fn logout_revokes_the_gate() {
    let ctx = TestContext::new();
    let cookie = admin_cookie(&ctx).await;

    let response = ctx
        .request(post_form("/admin/logout", "", Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = ctx.request(get("/admin", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}
