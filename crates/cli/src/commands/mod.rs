//! Subcommand implementations.
//!
//! Each command writes its report to the `out` handle it is given, so the
//! binary passes a locked stdout and tests pass a `Vec<u8>`.

pub mod catalog;
pub mod subscribers;

use thiserror::Error;

use cafe_artesano_core::NewsletterError;
use cafe_artesano_storefront::config::ConfigError;
use cafe_artesano_storefront::db::RepositoryError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Environment configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The subscriber list could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] RepositoryError),

    /// A subscription was refused.
    #[error("{0}")]
    Newsletter(#[from] NewsletterError),

    /// Writing the report failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}
