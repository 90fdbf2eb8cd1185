//! Pages, locale switching, newsletter signup, and middleware.

use reqwest::{StatusCode, header};

use cafe_artesano_core::SUBSCRIBERS_KEY;
use cafe_artesano_integration_tests::{TestContext, location};

fn stored_subscribers(ctx: &TestContext) -> Vec<String> {
    let path = ctx.data_dir().join(format!("{SUBSCRIBERS_KEY}.json"));
    match std::fs::read(&path) {
        Ok(bytes) => serde_json::from_slice(&bytes).expect("list file should be JSON"),
        Err(_) => Vec::new(),
    }
}

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_landing_page_sections() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Discover Your Perfect Brew"));
    assert!(body.contains(r#"id="products""#));
    assert!(body.contains(r#"id="brewing""#));
    assert!(body.contains(r#"id="newsletter""#));
    assert!(body.contains(r#"<html lang="en">"#));
}

#[tokio::test]
async fn test_brewing_tab_selection() {
    let ctx = TestContext::new().await;

    let (_, body) = ctx.get("/").await;
    assert!(body.contains("25-30 seconds"));

    let (_, body) = ctx.get("/?method=coldbrew").await;
    assert!(body.contains("12-24 hours"));
    assert!(!body.contains("25-30 seconds"));

    // Unknown methods show the first guide
    let (_, body) = ctx.get("/?method=percolator").await;
    assert!(body.contains("25-30 seconds"));
}

#[tokio::test]
async fn test_static_assets_served() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(ctx.url("/static/images/products/1.svg"))
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::OK);

    let (status, _) = ctx.get("/static/images/products/missing.svg").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_security_and_request_id_headers() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(ctx.url("/"))
        .send()
        .await
        .expect("request failed");
    let headers = resp.headers();

    let csp = headers
        .get(header::CONTENT_SECURITY_POLICY)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(csp.contains("script-src 'none'"), "{csp}");
    assert_eq!(
        headers.get(header::X_FRAME_OPTIONS).map(|v| v.as_bytes()),
        Some(&b"DENY"[..])
    );
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn test_upstream_request_id_is_echoed() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .client
        .get(ctx.url("/health"))
        .header("x-request-id", "trace-abc-123")
        .send()
        .await
        .expect("request failed");
    assert_eq!(
        resp.headers().get("x-request-id").map(|v| v.as_bytes()),
        Some(&b"trace-abc-123"[..])
    );
}

#[tokio::test]
async fn test_language_switch_persists() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .post("/language", &[("locale", "es"), ("return_to", "/cart")])
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/cart");

    let (_, body) = ctx.get("/cart").await;
    assert!(body.contains(r#"<html lang="es">"#));
    assert!(body.contains("Tu carrito está vacío"));

    let (_, body) = ctx.get("/").await;
    assert!(body.contains("Descubre Tu Café Perfecto"));
}

#[tokio::test]
async fn test_unsupported_locale_selects_english() {
    let ctx = TestContext::new().await;
    ctx.post("/language", &[("locale", "es")]).await;

    let resp = ctx.post("/language", &[("locale", "fr")]).await;
    assert_eq!(location(&resp), "/");

    let (_, body) = ctx.get("/").await;
    assert!(body.contains(r#"<html lang="en">"#));
}

#[tokio::test]
async fn test_newsletter_subscribe() {
    let ctx = TestContext::new().await;

    let resp = ctx
        .post("/newsletter", &[("email", "  Ana@Example.com ")])
        .await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/#newsletter");
    assert_eq!(stored_subscribers(&ctx), vec!["ana@example.com"]);

    // The form is replaced by the thank-you message for this visitor
    let (_, body) = ctx.get("/").await;
    assert!(body.contains("Thanks for subscribing!"));
    assert!(!body.contains(r#"action="/newsletter""#));
}

#[tokio::test]
async fn test_newsletter_duplicate_is_not_stored_twice() {
    let ctx = TestContext::new().await;

    ctx.post("/newsletter", &[("email", "ana@example.com")]).await;
    let other = TestContext::client();
    let resp = other
        .post(ctx.url("/newsletter"))
        .form(&[("email", "ANA@example.com")])
        .send()
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let body = other
        .get(ctx.url("/"))
        .send()
        .await
        .expect("request failed")
        .text()
        .await
        .expect("body");
    assert!(body.contains("Already subscribed"));
    assert_eq!(stored_subscribers(&ctx), vec!["ana@example.com"]);
}

#[tokio::test]
async fn test_newsletter_rejects_bad_input() {
    let ctx = TestContext::new().await;

    ctx.post("/newsletter", &[("email", "   ")]).await;
    let (_, body) = ctx.get("/").await;
    assert!(body.contains("Email required"));

    ctx.post("/newsletter", &[("email", "not-an-email")]).await;
    let (_, body) = ctx.get("/").await;
    assert!(body.contains("Invalid email"));

    assert!(stored_subscribers(&ctx).is_empty());
}

#[tokio::test]
async fn test_newsletter_storage_failure_shows_toast() {
    let ctx = TestContext::new().await;
    std::fs::write(
        ctx.data_dir().join(format!("{SUBSCRIBERS_KEY}.json")),
        "not json",
    )
    .expect("write corrupt list");

    let resp = ctx.post("/newsletter", &[("email", "ana@example.com")]).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let (status, body) = ctx.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("An error occurred"));
    assert!(body.contains(r#"action="/newsletter""#));
}

#[tokio::test]
async fn test_newsletter_is_rate_limited() {
    let ctx = TestContext::new().await;

    for attempt in 0..5 {
        let email = format!("reader{attempt}@example.com");
        let resp = ctx.post("/newsletter", &[("email", email.as_str())]).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "attempt {attempt}");
    }

    let resp = ctx
        .post("/newsletter", &[("email", "reader5@example.com")])
        .await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(stored_subscribers(&ctx).len(), 5);
}
