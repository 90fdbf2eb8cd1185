//! Newsletter subscriber list commands.
//!
//! # Usage
//!
//! ```bash
//! # Show everyone on the list
//! ca-cli subscribers list
//!
//! # Add an address by hand
//! ca-cli subscribers add ana@example.com
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATA_DIR` - Directory holding the list files (default: `data`).
//!   `--data-dir` overrides it.

use std::io::Write;
use std::path::PathBuf;

use cafe_artesano_core::{ListStore, SUBSCRIBERS_KEY, SubscribeOutcome, subscribe};
use cafe_artesano_storefront::config::StorefrontConfig;
use cafe_artesano_storefront::db::JsonListStore;

use super::CliError;

/// Open the list store in `data_dir`, or the storefront's configured one.
///
/// # Errors
///
/// Returns `CliError::Config` if the storefront environment is invalid.
pub fn open_store(data_dir: Option<PathBuf>) -> Result<JsonListStore, CliError> {
    let dir = match data_dir {
        Some(dir) => dir,
        None => {
            dotenvy::dotenv().ok();
            StorefrontConfig::from_env()?.data_dir
        }
    };
    tracing::debug!(dir = %dir.display(), "Using subscriber store");
    Ok(JsonListStore::new(dir))
}

/// Print every subscriber, one per line. Returns how many there are.
///
/// # Errors
///
/// Returns `CliError::Storage` if the list file is unreadable or corrupt.
pub fn list(out: &mut impl Write, store: &JsonListStore) -> Result<usize, CliError> {
    let subscribers = store.read_list(SUBSCRIBERS_KEY)?;
    for email in &subscribers {
        writeln!(out, "{email}")?;
    }
    tracing::info!(count = subscribers.len(), "Listed subscribers");
    Ok(subscribers.len())
}

/// Add an address to the list.
///
/// The address goes through the same validation as the storefront form, so
/// it is trimmed, lowercased, and refused if malformed. Adding an address
/// that is already present is reported but is not an error.
///
/// # Errors
///
/// Returns `CliError::Newsletter` if the address is blank or invalid or the
/// store fails.
pub fn add(out: &mut impl Write, store: &JsonListStore, email: &str) -> Result<(), CliError> {
    let outcome = {
        let _updating = store.lock_updates();
        subscribe(store, email)?
    };

    match outcome {
        SubscribeOutcome::Subscribed(email) => {
            tracing::info!(email = %email, "Subscriber added");
            writeln!(out, "Subscribed {email}")?;
        }
        SubscribeOutcome::AlreadySubscribed(email) => {
            writeln!(out, "{email} is already subscribed")?;
        }
    }
    Ok(())
}
