//! Application state shared across handlers.

use std::sync::Arc;

use cafe_artesano_core::Catalog;

use crate::config::StorefrontConfig;
use crate::db::JsonListStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds only process-wide data; everything
/// per visitor lives in the session.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    subscribers: Arc<JsonListStore>,
}

impl AppState {
    /// Create application state serving the featured catalog.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        Self::with_catalog(config, Catalog::featured())
    }

    /// Create application state serving `catalog`.
    #[must_use]
    pub fn with_catalog(config: StorefrontConfig, catalog: Catalog) -> Self {
        let subscribers = Arc::new(JsonListStore::new(config.data_dir.clone()));

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                subscribers,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// The products for sale.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// The newsletter list store, shareable with blocking tasks.
    #[must_use]
    pub fn subscribers(&self) -> Arc<JsonListStore> {
        Arc::clone(&self.inner.subscribers)
    }
}
