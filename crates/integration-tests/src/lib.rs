//! Integration tests for Café Artesano.
//!
//! Each test starts a real storefront on an ephemeral port and talks to it
//! over HTTP with a cookie-keeping client, so sessions, redirects, and
//! middleware behave exactly as they do for a browser.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cafe-artesano-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart` - Cart operations through the storefront routes
//! - `catalog` - Search, roast filter, and sort over the featured catalog
//! - `storefront` - Pages, locale switching, newsletter, and middleware

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use reqwest::{Client, Response, StatusCode, header};
use tempfile::TempDir;

use cafe_artesano_storefront::config::StorefrontConfig;
use cafe_artesano_storefront::state::AppState;

/// A running storefront plus a client holding one visitor's session.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    data_dir: TempDir,
}

impl TestContext {
    /// Start a storefront with no simulated delays and a fresh data directory.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot bind or the client cannot be built.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Start a storefront after letting `configure` adjust the test config.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot bind or the client cannot be built.
    pub async fn with_config(configure: impl FnOnce(&mut StorefrontConfig)) -> Self {
        let data_dir = tempfile::tempdir().expect("Failed to create data dir");

        let mut config = StorefrontConfig {
            data_dir: data_dir.path().to_path_buf(),
            checkout_delay: Duration::ZERO,
            newsletter_delay: Duration::ZERO,
            ..StorefrontConfig::default()
        };
        configure(&mut config);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let app = cafe_artesano_storefront::app(AppState::new(config));
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("Test server failed");
        });

        Self {
            client: Self::client(),
            base_url: format!("http://{addr}"),
            data_dir,
        }
    }

    /// A cookie-keeping client that does not follow redirects, so tests can
    /// assert on the `303` and its `Location`.
    ///
    /// # Panics
    ///
    /// Panics if the client cannot be built.
    #[must_use]
    pub fn client() -> Client {
        Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client")
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Directory backing the newsletter list.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.data_dir.path()
    }

    /// GET `path` and return status and body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn get(&self, path: &str) -> (StatusCode, String) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed");
        let status = resp.status();
        (status, resp.text().await.expect("Failed to read body"))
    }

    /// POST a form to `path`.
    ///
    /// # Panics
    ///
    /// Panics if the request fails.
    pub async fn post(&self, path: &str, form: &[(&str, &str)]) -> Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request failed")
    }

    /// Add `quantity` of `product_id` to this visitor's cart.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or is not redirected.
    pub async fn add_to_cart(&self, product_id: &str, quantity: u32) {
        let quantity = quantity.to_string();
        let resp = self
            .post(
                "/cart/add",
                &[("product_id", product_id), ("quantity", &quantity)],
            )
            .await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "add {product_id}");
    }

    /// The number shown in the cart badge.
    ///
    /// # Panics
    ///
    /// Panics if the fragment cannot be fetched or parsed.
    pub async fn cart_count(&self) -> u64 {
        let (status, body) = self.get("/cart/count").await;
        assert_eq!(status, StatusCode::OK);
        body.split('>')
            .nth(1)
            .and_then(|rest| rest.split('<').next())
            .and_then(|count| count.trim().parse().ok())
            .expect("Cart badge should hold a number")
    }
}

/// The `Location` a redirect points to.
///
/// # Panics
///
/// Panics if the response has no valid `Location` header.
#[must_use]
pub fn location(resp: &Response) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("Redirect should carry a Location header")
        .to_string()
}
