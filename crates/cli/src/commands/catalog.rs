//! Catalog query command.
//!
//! # Usage
//!
//! ```bash
//! # Everything, sorted by name
//! ca-cli catalog
//!
//! # Light roasts mentioning "floral", most expensive first
//! ca-cli catalog --search floral --roast light --sort price-high
//! ```
//!
//! Unknown `--roast` or `--sort` values fall back to "all" and "name", the
//! same way the storefront treats its query string.

use std::io::Write;

use cafe_artesano_core::{Catalog, QueryState};

use super::CliError;

/// Run the search/filter/sort pipeline over the featured catalog and print
/// one line per match.
///
/// Returns the number of products listed.
///
/// # Errors
///
/// Returns `CliError::Output` if writing to `out` fails.
pub fn list(
    out: &mut impl Write,
    search: Option<&str>,
    roast: Option<&str>,
    sort: Option<&str>,
) -> Result<usize, CliError> {
    let catalog = Catalog::featured();
    let state = QueryState::from_params(search, roast, sort);
    let products = catalog.query(&state);

    tracing::debug!(
        search = %state.search_term,
        roast = state.roast_filter.as_param(),
        sort = state.sort_key.as_param(),
        matches = products.len(),
        "Catalog query"
    );

    if products.is_empty() {
        writeln!(out, "No products found matching your criteria.")?;
        return Ok(0);
    }

    for product in &products {
        writeln!(
            out,
            "{:>3}  {:<24} {:<12} {:<7} {:>7}  {}",
            product.id,
            product.name,
            product.origin,
            product.roast_level.name(),
            product.price.display(),
            product.rating,
        )?;
    }
    writeln!(out, "{} of {} products", products.len(), catalog.len())?;

    Ok(products.len())
}
