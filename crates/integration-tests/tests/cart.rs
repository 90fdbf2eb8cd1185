//! Cart behavior through the storefront routes.

use reqwest::StatusCode;

use cafe_artesano_integration_tests::{TestContext, location};

#[tokio::test]
async fn test_add_to_cart_updates_badge_and_toast() {
    let ctx = TestContext::new().await;

    ctx.add_to_cart("1", 2).await;
    ctx.add_to_cart("6", 1).await;
    assert_eq!(ctx.cart_count().await, 3);

    let (status, body) = ctx.get("/cart").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Ethiopian Yirgacheffe"));
    assert!(body.contains("Jamaican Blue Mountain"));
    assert!(body.contains("$99.97"));
    assert!(body.contains("Added to cart!"));

    // Toasts are shown once
    let (_, body) = ctx.get("/cart").await;
    assert!(!body.contains("Added to cart!"));
}

#[tokio::test]
async fn test_adding_same_product_merges_lines() {
    let ctx = TestContext::new().await;

    ctx.add_to_cart("2", 1).await;
    ctx.add_to_cart("2", 3).await;

    let (_, body) = ctx.get("/cart").await;
    assert_eq!(ctx.cart_count().await, 4);
    assert!(body.contains("1 item in your cart"));
    assert!(body.contains("$79.96"));
}

#[tokio::test]
async fn test_add_redirects_to_safe_return_path() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .post(
            "/cart/add",
            &[("product_id", "3"), ("return_to", "/?roast=dark#products")],
        )
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/?roast=dark#products");

    let resp = ctx
        .post(
            "/cart/add",
            &[("product_id", "3"), ("return_to", "https://evil.example/")],
        )
        .await;
    assert_eq!(location(&resp), "/");
    assert_eq!(ctx.cart_count().await, 2);
}

#[tokio::test]
async fn test_add_unknown_product_is_not_found() {
    let ctx = TestContext::new().await;

    let resp = ctx.post("/cart/add", &[("product_id", "999")]).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(ctx.cart_count().await, 0);
}

#[tokio::test]
async fn test_add_without_product_is_bad_request() {
    let ctx = TestContext::new().await;

    let resp = ctx.post("/cart/add", &[("quantity", "2")]).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ctx.cart_count().await, 0);
}

#[tokio::test]
async fn test_add_zero_quantity_changes_nothing() {
    let ctx = TestContext::new().await;

    ctx.add_to_cart("4", 0).await;
    assert_eq!(ctx.cart_count().await, 0);

    let (_, body) = ctx.get("/cart").await;
    assert!(!body.contains("Added to cart!"));
}

#[tokio::test]
async fn test_update_quantity_and_remove_by_zero() {
    let ctx = TestContext::new().await;
    ctx.add_to_cart("1", 1).await;
    ctx.add_to_cart("5", 1).await;
    // Drain the add-to-cart toasts
    ctx.get("/cart").await;

    let resp = ctx
        .post("/cart/update", &[("product_id", "1"), ("quantity", "5")])
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/cart");
    assert_eq!(ctx.cart_count().await, 6);

    ctx.post("/cart/update", &[("product_id", "5"), ("quantity", "-1")])
        .await;
    assert_eq!(ctx.cart_count().await, 5);

    let (_, body) = ctx.get("/cart").await;
    assert!(!body.contains("Costa Rican"));
}

#[tokio::test]
async fn test_update_missing_line_is_noop() {
    let ctx = TestContext::new().await;
    ctx.add_to_cart("1", 1).await;

    ctx.post("/cart/update", &[("product_id", "2"), ("quantity", "4")])
        .await;
    assert_eq!(ctx.cart_count().await, 1);
}

#[tokio::test]
async fn test_remove_and_clear() {
    let ctx = TestContext::new().await;
    ctx.add_to_cart("1", 1).await;
    ctx.add_to_cart("2", 2).await;
    ctx.add_to_cart("3", 3).await;

    ctx.post("/cart/remove", &[("product_id", "2")]).await;
    assert_eq!(ctx.cart_count().await, 4);

    let resp = ctx.post("/cart/clear", &[]).await;
    assert_eq!(location(&resp), "/cart");
    assert_eq!(ctx.cart_count().await, 0);

    let (_, body) = ctx.get("/cart").await;
    assert!(body.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_checkout_clears_cart() {
    let ctx = TestContext::new().await;
    ctx.add_to_cart("6", 2).await;

    let resp = ctx.post("/cart/checkout", &[]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
    assert_eq!(ctx.cart_count().await, 0);

    let (_, body) = ctx.get("/").await;
    assert!(body.contains("Checkout initiated"));
    assert!(body.contains("Order confirmed!"));
}

#[tokio::test]
async fn test_checkout_empty_cart_returns_to_cart() {
    let ctx = TestContext::new().await;

    let resp = ctx.post("/cart/checkout", &[]).await;
    assert_eq!(location(&resp), "/cart");

    let (_, body) = ctx.get("/").await;
    assert!(!body.contains("Order confirmed!"));
}

#[tokio::test]
async fn test_carts_are_per_visitor() {
    let ctx = TestContext::new().await;
    ctx.add_to_cart("1", 3).await;

    let other = TestContext::client();
    let body = other
        .get(ctx.url("/cart/count"))
        .send()
        .await
        .expect("request failed")
        .text()
        .await
        .expect("body");
    assert!(body.contains(">0<"), "{body}");
    assert_eq!(ctx.cart_count().await, 3);
}
