//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Landing page (hero, catalog, brewing guide, newsletter)
//! GET  /health            - Health check
//! GET  /static/*          - Static assets
//!
//! # Products
//! GET  /products          - Catalog section (?q=&roast=&sort=)
//!
//! # Cart
//! GET  /cart              - Cart page
//! GET  /cart/count        - Cart count badge (fragment)
//! POST /cart/add          - Add to cart, redirect back
//! POST /cart/update       - Set a line's quantity
//! POST /cart/remove       - Remove a line
//! POST /cart/clear        - Empty the cart
//! POST /cart/checkout     - Simulated checkout
//!
//! # Newsletter
//! POST /newsletter        - Subscribe (rate limited)
//!
//! # Language
//! POST /language          - Switch UI locale
//! ```

pub mod cart;
pub mod home;
pub mod language;
pub mod newsletter;
pub mod products;

use axum::{
    Form, Router,
    extract::rejection::FormRejection,
    middleware::from_fn,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use cafe_artesano_core::{Locale, Translator};

use crate::error::Result;
use crate::middleware::{
    Shopper, create_session_layer, newsletter_rate_limiter, request_id_middleware,
    security_headers_middleware,
};
use crate::models::Toast;
use crate::state::AppState;

/// Directory served under `/static`.
const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/static");

/// A form body, or the reason it could not be decoded.
///
/// Handlers take this instead of a bare [`Form`] so malformed posts become
/// [`AppError::BadRequest`](crate::error::AppError::BadRequest) with `?`.
pub type FormInput<T> = std::result::Result<Form<T>, FormRejection>;

/// Header, footer, and toast data every full page needs.
#[derive(Debug, Clone)]
pub struct PageChrome {
    pub t: Translator,
    pub locale: Locale,
    pub locales: [Locale; 2],
    pub cart_count: u64,
    pub toasts: Vec<Toast>,
    /// Where the language switcher and add-to-cart forms return to.
    pub current_path: String,
}

impl PageChrome {
    /// Build the chrome for a page, consuming any queued toasts.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if the session store fails.
    pub async fn load(shopper: &Shopper, current_path: impl Into<String>) -> Result<Self> {
        let locale = shopper.locale().await;
        let cart_count = shopper.cart().await?.total_item_count();
        let toasts = shopper.take_toasts().await?;

        Ok(Self {
            t: Translator::new(locale),
            locale,
            locales: Locale::ALL,
            cart_count,
            toasts,
            current_path: current_path.into(),
        })
    }
}

/// Accept `return_to` only when it is a same-site absolute path.
///
/// Anything else (missing, relative, protocol-relative, or a full URL)
/// becomes `fallback`.
#[must_use]
pub fn safe_return_to(return_to: Option<&str>, fallback: &str) -> String {
    match return_to.map(str::trim) {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.starts_with("/\\")
                && !path.chars().any(char::is_control) =>
        {
            path.to_string()
        }
        _ => fallback.to_string(),
    }
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/checkout", post(cart::checkout))
}

/// Create the newsletter routes router.
pub fn newsletter_routes() -> Router<AppState> {
    Router::new()
        .route("/newsletter", post(newsletter::subscribe))
        .layer(newsletter_rate_limiter())
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/products", get(products::index))
        .nest("/cart", cart_routes())
        .merge(newsletter_routes())
        .route("/language", post(language::switch))
}

/// The complete application: routes, static files, and per-request middleware.
///
/// Tracing and Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(session_layer)
        .layer(from_fn(security_headers_middleware))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::config::StorefrontConfig;

    #[test]
    fn test_safe_return_to_accepts_paths() {
        assert_eq!(safe_return_to(Some("/cart"), "/"), "/cart");
        assert_eq!(
            safe_return_to(Some("/products?roast=dark#products"), "/"),
            "/products?roast=dark#products"
        );
    }

    #[test]
    fn test_safe_return_to_rejects_offsite() {
        for candidate in [
            "https://evil.example",
            "//evil.example",
            "/\\evil.example",
            "cart",
            "",
            "/cart\r\nSet-Cookie: x=1",
        ] {
            assert_eq!(safe_return_to(Some(candidate), "/"), "/", "{candidate}");
        }
        assert_eq!(safe_return_to(None, "/cart"), "/cart");
    }

    #[tokio::test]
    async fn test_health_through_middleware() {
        let app = app(AppState::new(StorefrontConfig::default()));

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert!(response.headers().contains_key("content-security-policy"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = app(AppState::new(StorefrontConfig::default()));

        let response = app
            .oneshot(Request::get("/blog").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_form_is_bad_request() {
        let app = app(AppState::new(StorefrontConfig::default()));

        let request = Request::post("/cart/update")
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from("product_id=1&quantity=lots"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
