//! Local storage for the storefront.
//!
//! The catalog is compiled in and carts live in the session, so the only
//! persisted data is the newsletter subscriber list. It is kept as one JSON
//! file per list key under the configured data directory:
//!
//! ```text
//! data/
//!   newsletter-subscribers.json   ["ana@example.com", ...]
//! ```

pub mod subscribers;

pub use subscribers::JsonListStore;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Reading or writing a list file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A list file exists but does not hold a JSON array of strings.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The list key cannot be used as a file name.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// The blocking storage task did not complete.
    #[error("storage task failed: {0}")]
    TaskFailed(String),
}
