//! Cart behavior through the HTTP surface, session cookie included.

use axum::http::StatusCode;

use pixelpunk_integration_tests::{TestContext, body_string, get, post_form, session_cookie};

#[tokio::test]
async fn add_to_cart_sets_session_and_renders_panel() {
    let ctx = TestContext::new();

    let response = ctx
        .request(post_form("/cart/add", "product_id=PX-001", None))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers().get("HX-Trigger").is_some(),
        "add must trigger the cart panel"
    );

    let cookie = session_cookie(&response).expect("session cookie");
    let body = body_string(response).await;
    assert!(body.contains("HYBRID BLAZER // ARCHIVE-01"));
    assert!(body.contains("$240.00"));

    // The count badge sees the same session.
    let response = ctx.request(get("/cart/count", Some(&cookie))).await;
    let body = body_string(response).await;
    assert!(body.contains('1'));
}

#[tokio::test]
async fn adding_twice_keeps_a_single_entry() {
    let ctx = TestContext::new();

    let response = ctx
        .request(post_form("/cart/add", "product_id=PX-001", None))
        .await;
    let cookie = session_cookie(&response).expect("session cookie");

    let response = ctx
        .request(post_form("/cart/add", "product_id=PX-001", Some(&cookie)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    // Still one line: the subtotal is a single blazer.
    assert!(body.contains("$240.00"));
    assert_eq!(body.matches("class=\"cart-line\"").count(), 1);
}

#[tokio::test]
async fn subtotal_sums_distinct_pieces() {
    let ctx = TestContext::new();

    let response = ctx
        .request(post_form("/cart/add", "product_id=PX-001", None))
        .await;
    let cookie = session_cookie(&response).expect("session cookie");

    let response = ctx
        .request(post_form("/cart/add", "product_id=PX-003", Some(&cookie)))
        .await;
    let body = body_string(response).await;
    // $240 + $145
    assert!(body.contains("$385.00"));
}

#[tokio::test]
async fn remove_then_re_add_restores_single_entry() {
    let ctx = TestContext::new();

    let response = ctx
        .request(post_form("/cart/add", "product_id=PX-001", None))
        .await;
    let cookie = session_cookie(&response).expect("session cookie");

    let response = ctx
        .request(post_form("/cart/remove", "product_id=PX-001", Some(&cookie)))
        .await;
    let body = body_string(response).await;
    assert!(body.contains("VAULT ACCESS EMPTY"));

    let response = ctx
        .request(post_form("/cart/add", "product_id=PX-001", Some(&cookie)))
        .await;
    let body = body_string(response).await;
    assert!(body.contains("$240.00"));
}

#[tokio::test]
async fn sold_pieces_cannot_be_carted() {
    let ctx = TestContext::new();

    // PX-002 ships as sold in the default dataset.
    let response = ctx
        .request(post_form("/cart/add", "product_id=PX-002", None))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("VAULT ACCESS EMPTY"));
}

#[tokio::test]
async fn unknown_piece_leaves_cart_untouched() {
    let ctx = TestContext::new();

    let response = ctx
        .request(post_form("/cart/add", "product_id=PX-404", None))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("VAULT ACCESS EMPTY"));
}
