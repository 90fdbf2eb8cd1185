//! Product route handlers.
//!
//! The catalog section is rendered from a [`QueryState`] parsed out of the
//! query string, so every filter combination is a shareable URL.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{OriginalUri, Query, State};
use serde::Deserialize;
use tracing::instrument;

use cafe_artesano_core::{Catalog, Product, QueryState, RoastFilter, SortKey};

use crate::error::Result;
use crate::filters;
use crate::middleware::Shopper;
use crate::routes::PageChrome;
use crate::state::AppState;

/// Product display data for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub origin: String,
    pub roast_name: &'static str,
    pub roast_slug: &'static str,
    pub description: String,
    pub price: String,
    pub tasting_notes: Vec<String>,
    pub rating: String,
    pub image_ref: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            origin: product.origin.clone(),
            roast_name: product.roast_level.name(),
            roast_slug: product.roast_level.slug(),
            description: product.description.clone(),
            price: product.price.display(),
            tasting_notes: product.tasting_notes.clone(),
            rating: product.rating.to_string(),
            image_ref: product.image_ref.clone(),
        }
    }
}

/// One `<option>` in a filter dropdown.
#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Catalog query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    pub q: Option<String>,
    pub roast: Option<String>,
    pub sort: Option<String>,
    /// Brewing guide tab; only used by the landing page.
    pub method: Option<String>,
}

impl CatalogQuery {
    /// Parse into a [`QueryState`]; unknown values fall back to defaults.
    #[must_use]
    pub fn state(&self) -> QueryState {
        QueryState::from_params(
            self.q.as_deref(),
            self.roast.as_deref(),
            self.sort.as_deref(),
        )
    }
}

/// The filtered, sorted catalog section.
#[derive(Debug, Clone)]
pub struct CatalogView {
    pub products: Vec<ProductView>,
    pub search_term: String,
    pub roast_options: Vec<SelectOption>,
    pub sort_options: Vec<SelectOption>,
    /// True when search or roast narrow the list, so "clear filters" applies.
    pub filtered: bool,
    /// Link that keeps the sort but drops search and roast.
    pub clear_href: String,
}

impl CatalogView {
    /// Run the query pipeline and shape the result for templates.
    #[must_use]
    pub fn build(catalog: &Catalog, state: &QueryState) -> Self {
        let products = catalog.query(state).into_iter().map(ProductView::from).collect();

        let roast_options = [
            (RoastFilter::All, "All Roasts"),
            (RoastFilter::Light, "Light Roast"),
            (RoastFilter::Medium, "Medium Roast"),
            (RoastFilter::Dark, "Dark Roast"),
        ]
        .into_iter()
        .map(|(filter, label)| SelectOption {
            value: filter.as_param(),
            label,
            selected: filter == state.roast_filter,
        })
        .collect();

        let sort_options = SortKey::ALL
            .into_iter()
            .map(|key| SelectOption {
                value: key.as_param(),
                label: sort_label(key),
                selected: key == state.sort_key,
            })
            .collect();

        let cleared = state.cleared();
        Self {
            products,
            search_term: state.search_term.clone(),
            roast_options,
            sort_options,
            filtered: !state.is_unfiltered(),
            clear_href: format!("/?sort={}#products", cleared.sort_key.as_param()),
        }
    }
}

const fn sort_label(key: SortKey) -> &'static str {
    match key {
        SortKey::NameAscending => "Name A-Z",
        SortKey::PriceAscending => "Price: Low to High",
        SortKey::PriceDescending => "Price: High to Low",
        SortKey::RatingDescending => "Highest Rated",
    }
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub chrome: PageChrome,
    pub catalog: CatalogView,
}

/// Display the catalog section on its own page.
#[instrument(skip(state, shopper, uri))]
pub async fn index(
    State(state): State<AppState>,
    shopper: Shopper,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<CatalogQuery>,
) -> Result<ProductsIndexTemplate> {
    let current_path = uri
        .path_and_query()
        .map_or_else(|| "/products".to_string(), ToString::to_string);

    Ok(ProductsIndexTemplate {
        chrome: PageChrome::load(&shopper, current_path).await?,
        catalog: CatalogView::build(state.catalog(), &query.state()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_view_marks_selection() {
        let state = QueryState::from_params(None, Some("dark"), Some("price-high"));
        let view = CatalogView::build(&Catalog::featured(), &state);

        let roast: Vec<_> = view
            .roast_options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value)
            .collect();
        let sort: Vec<_> = view
            .sort_options
            .iter()
            .filter(|o| o.selected)
            .map(|o| o.value)
            .collect();

        assert_eq!(roast, vec!["dark"]);
        assert_eq!(sort, vec!["price-high"]);
        assert!(view.filtered);
        assert_eq!(view.clear_href, "/?sort=price-high#products");
    }

    #[test]
    fn test_catalog_view_formats_products() {
        let view = CatalogView::build(&Catalog::featured(), &QueryState::default());
        let first = &view.products[0];

        assert_eq!(first.name, "Brazilian Santos");
        assert_eq!(first.price, "$17.99");
        assert_eq!(first.roast_name, "Dark");
        assert!(!view.filtered);
    }

    #[test]
    fn test_unknown_params_fall_back() {
        let query = CatalogQuery {
            roast: Some("burnt".to_string()),
            sort: Some("random".to_string()),
            ..CatalogQuery::default()
        };
        assert_eq!(query.state(), QueryState::default());
    }
}
