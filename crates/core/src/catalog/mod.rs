//! Product catalog and query engine.
//!
//! The catalog is a fixed, compiled-in product list. Shoppers see a view
//! derived from it by [`query`]: search, then roast filter, then a stable
//! sort. The catalog knows nothing about carts.

mod data;
mod query;

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId, RoastLevel};

pub use query::{QueryState, RoastFilter, SortKey, query};

/// Errors raised while assembling a catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Two products share an id.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
}

/// A coffee for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub origin: String,
    pub roast_level: RoastLevel,
    pub description: String,
    pub price: Price,
    pub tasting_notes: Vec<String>,
    /// Average review score in `[0, 5]`.
    pub rating: Decimal,
    /// Opaque reference to the product image asset.
    pub image_ref: String,
}

impl Product {
    /// True when `needle` (already lowercased) occurs in the name, origin,
    /// or any tasting note, ignoring case.
    fn mentions(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.origin.to_lowercase().contains(needle)
            || self
                .tasting_notes
                .iter()
                .any(|note| note.to_lowercase().contains(needle))
    }
}

/// A set of products with unique ids, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] naming the first repeated id.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(&product.id) {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    /// The house selection sold on the site.
    #[must_use]
    pub fn featured() -> Self {
        Self {
            products: data::featured_coffees(),
        }
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True when the catalog has no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Run the search/filter/sort pipeline over this catalog.
    #[must_use]
    pub fn query(&self, state: &QueryState) -> Vec<&Product> {
        query(&self.products, state)
    }
}
