//! Per-visitor session state and its extractor.
//!
//! [`Shopper`] wraps the visitor's session and knows how to load and store
//! the cart, locale, newsletter flag, and queued toasts. Handlers take it as
//! an argument instead of reading session keys by hand.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use cafe_artesano_core::{CartLineItem, CartStore, Locale};

use crate::error::AppError;
use crate::models::{Toast, session_keys};

/// The current visitor, backed by their session.
#[derive(Debug, Clone)]
pub struct Shopper {
    session: Session,
}

/// Returned when the session layer is missing from the router.
pub struct MissingSession;

impl IntoResponse for MissingSession {
    fn into_response(self) -> Response {
        tracing::error!("Session layer not installed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
    }
}

impl<S> FromRequestParts<S> for Shopper
where
    S: Send + Sync,
{
    type Rejection = MissingSession;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer
        let session = parts
            .extensions
            .get::<Session>()
            .cloned()
            .ok_or(MissingSession)?;

        Ok(Self { session })
    }
}

impl Shopper {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }

    /// Load the cart saved in the session, or an empty one.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if the session store fails.
    pub async fn cart(&self) -> Result<CartStore, AppError> {
        let items: Vec<CartLineItem> = self
            .session
            .get(session_keys::CART_ITEMS)
            .await?
            .unwrap_or_default();
        Ok(CartStore::from_items(items))
    }

    /// Load the cart, apply `change`, and save it back if anything changed.
    ///
    /// Returns the cart after the change.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if the session store fails.
    pub async fn update_cart<F>(&self, change: F) -> Result<CartStore, AppError>
    where
        F: FnOnce(&mut CartStore),
    {
        let mut cart = self.cart().await?;

        let dirty = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&dirty);
        let subscription = cart.subscribe(move |_| flag.store(true, Ordering::Relaxed));

        change(&mut cart);
        cart.unsubscribe(subscription);

        if dirty.load(Ordering::Relaxed) {
            self.session
                .insert(session_keys::CART_ITEMS, cart.items())
                .await?;
        }

        Ok(cart)
    }

    /// The visitor's locale. Unknown or missing values read as English.
    pub async fn locale(&self) -> Locale {
        self.session
            .get::<Locale>(session_keys::LOCALE)
            .await
            .ok()
            .flatten()
            .unwrap_or_default()
    }

    /// Remember the visitor's locale.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if the session store fails.
    pub async fn set_locale(&self, locale: Locale) -> Result<(), AppError> {
        self.session.insert(session_keys::LOCALE, locale).await?;
        Ok(())
    }

    /// Whether this visitor already joined the newsletter.
    pub async fn newsletter_subscribed(&self) -> bool {
        self.session
            .get::<bool>(session_keys::NEWSLETTER_SUBSCRIBED)
            .await
            .ok()
            .flatten()
            .unwrap_or(false)
    }

    /// Record a successful newsletter signup.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if the session store fails.
    pub async fn mark_subscribed(&self) -> Result<(), AppError> {
        self.session
            .insert(session_keys::NEWSLETTER_SUBSCRIBED, true)
            .await?;
        Ok(())
    }

    /// Queue a toast for the next rendered page.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if the session store fails.
    pub async fn push_toast(&self, toast: Toast) -> Result<(), AppError> {
        let mut toasts: Vec<Toast> = self
            .session
            .get(session_keys::TOASTS)
            .await?
            .unwrap_or_default();
        toasts.push(toast);
        self.session.insert(session_keys::TOASTS, toasts).await?;
        Ok(())
    }

    /// Remove and return all queued toasts.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Session` if the session store fails.
    pub async fn take_toasts(&self) -> Result<Vec<Toast>, AppError> {
        let toasts: Option<Vec<Toast>> = self.session.remove(session_keys::TOASTS).await?;
        Ok(toasts.unwrap_or_default())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use cafe_artesano_core::{Catalog, ProductId, ProductSnapshot};

    use super::*;

    fn shopper() -> Shopper {
        let store = Arc::new(MemoryStore::default());
        Shopper::new(Session::new(None, store, None))
    }

    fn snapshot(id: &str) -> ProductSnapshot {
        let catalog = Catalog::featured();
        ProductSnapshot::from(catalog.get(&ProductId::new(id)).unwrap())
    }

    #[tokio::test]
    async fn test_cart_starts_empty() {
        let shopper = shopper();
        assert!(shopper.cart().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_cart_persists_changes() {
        let shopper = shopper();
        shopper
            .update_cart(|cart| cart.add_item(snapshot("2"), 2))
            .await
            .unwrap();

        let cart = shopper.cart().await.unwrap();
        assert_eq!(cart.total_item_count(), 2);
        assert_eq!(cart.total_price().display(), "$39.98");
    }

    #[tokio::test]
    async fn test_noop_change_does_not_write() {
        let shopper = shopper();
        shopper
            .update_cart(|cart| cart.remove_item(&ProductId::new("1")))
            .await
            .unwrap();

        let stored: Option<Vec<CartLineItem>> =
            shopper.session.get(session_keys::CART_ITEMS).await.unwrap();
        assert!(stored.is_none());
    }

    #[tokio::test]
    async fn test_toasts_are_taken_once() {
        let shopper = shopper();
        shopper.push_toast(Toast::success("one")).await.unwrap();
        shopper.push_toast(Toast::info("two")).await.unwrap();

        let toasts = shopper.take_toasts().await.unwrap();
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].title, "one");
        assert!(shopper.take_toasts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_locale_defaults_to_english() {
        let shopper = shopper();
        assert_eq!(shopper.locale().await, Locale::En);
        shopper.set_locale(Locale::Es).await.unwrap();
        assert_eq!(shopper.locale().await, Locale::Es);
    }

    #[tokio::test]
    async fn test_newsletter_flag() {
        let shopper = shopper();
        assert!(!shopper.newsletter_subscribed().await);
        shopper.mark_subscribed().await.unwrap();
        assert!(shopper.newsletter_subscribed().await);
    }
}
