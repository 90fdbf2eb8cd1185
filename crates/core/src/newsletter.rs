//! Newsletter subscriber capture.
//!
//! Subscribers are kept as a list of strings under [`SUBSCRIBERS_KEY`] in a
//! [`ListStore`]. That trait is the only storage surface in the system; the
//! storefront backs it with JSON files and tests use [`MemoryListStore`].

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Mutex, PoisonError};

use crate::types::{Email, EmailError};

/// Storage key of the subscriber list.
pub const SUBSCRIBERS_KEY: &str = "newsletter-subscribers";

/// A key/value store whose values are string lists.
pub trait ListStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the list under `key`. A key never written reads as empty.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the backing storage cannot be read.
    fn read_list(&self, key: &str) -> Result<Vec<String>, Self::Error>;

    /// Replace the list under `key`.
    ///
    /// # Errors
    ///
    /// Returns the store's error if the backing storage cannot be written.
    fn write_list(&self, key: &str, values: &[String]) -> Result<(), Self::Error>;
}

/// Result of a successful subscription attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscribeOutcome {
    /// The address was added to the list.
    Subscribed(Email),
    /// The address was already on the list; nothing was written.
    AlreadySubscribed(Email),
}

/// Reasons a subscription was refused.
#[derive(Debug, thiserror::Error)]
pub enum NewsletterError {
    /// Nothing was entered.
    #[error("email required")]
    MissingEmail,

    /// The input is not an email address.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// The subscriber list could not be read or written.
    #[error("subscriber storage failed: {0}")]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

/// Add an address to the subscriber list unless it is already there.
///
/// Input is trimmed and lowercased before validation and comparison.
///
/// # Errors
///
/// - [`NewsletterError::MissingEmail`] for blank input
/// - [`NewsletterError::InvalidEmail`] when the address is malformed
/// - [`NewsletterError::Storage`] when the store fails
pub fn subscribe<S: ListStore>(
    store: &S,
    raw_email: &str,
) -> Result<SubscribeOutcome, NewsletterError> {
    let normalized = raw_email.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(NewsletterError::MissingEmail);
    }
    let email = Email::parse(&normalized)?;

    let mut subscribers = store
        .read_list(SUBSCRIBERS_KEY)
        .map_err(|e| NewsletterError::Storage(Box::new(e)))?;

    if subscribers.iter().any(|existing| existing == email.as_str()) {
        return Ok(SubscribeOutcome::AlreadySubscribed(email));
    }

    subscribers.push(email.as_str().to_owned());
    store
        .write_list(SUBSCRIBERS_KEY, &subscribers)
        .map_err(|e| NewsletterError::Storage(Box::new(e)))?;

    Ok(SubscribeOutcome::Subscribed(email))
}

/// A [`ListStore`] held in process memory.
#[derive(Debug, Default)]
pub struct MemoryListStore {
    lists: Mutex<HashMap<String, Vec<String>>>,
}

impl MemoryListStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ListStore for MemoryListStore {
    type Error = Infallible;

    fn read_list(&self, key: &str) -> Result<Vec<String>, Self::Error> {
        let lists = self.lists.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(lists.get(key).cloned().unwrap_or_default())
    }

    fn write_list(&self, key: &str, values: &[String]) -> Result<(), Self::Error> {
        let mut lists = self.lists.lock().unwrap_or_else(PoisonError::into_inner);
        lists.insert(key.to_owned(), values.to_vec());
        Ok(())
    }
}
