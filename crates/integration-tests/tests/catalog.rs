//! Catalog search, filter, and sort over HTTP and through the core API.

use reqwest::StatusCode;

use cafe_artesano_core::{Catalog, QueryState, RoastLevel};
use cafe_artesano_integration_tests::TestContext;

const ALL_NAMES: [&str; 6] = [
    "Brazilian Santos",
    "Colombian Supremo",
    "Costa Rican Tarrazú",
    "Ethiopian Yirgacheffe",
    "Guatemala Antigua",
    "Jamaican Blue Mountain",
];

/// Names from `ALL_NAMES` present in `body`, in the order they first appear.
fn listed(body: &str) -> Vec<&'static str> {
    let mut found: Vec<(usize, &'static str)> = ALL_NAMES
        .iter()
        .filter_map(|name| body.find(name).map(|at| (at, *name)))
        .collect();
    found.sort_unstable();
    found.into_iter().map(|(_, name)| name).collect()
}

fn names(products: &[&cafe_artesano_core::Product]) -> Vec<String> {
    products.iter().map(|p| p.name.clone()).collect()
}

#[tokio::test]
async fn test_default_listing_is_name_order() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.get("/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed(&body), ALL_NAMES.to_vec());
    assert!(!body.contains("Clear Filters"));
}

#[tokio::test]
async fn test_sort_orders() {
    let ctx = TestContext::new().await;

    let (_, body) = ctx.get("/products?sort=price-low").await;
    assert_eq!(
        listed(&body),
        vec![
            "Brazilian Santos",
            "Colombian Supremo",
            "Guatemala Antigua",
            "Ethiopian Yirgacheffe",
            "Costa Rican Tarrazú",
            "Jamaican Blue Mountain",
        ]
    );

    let (_, body) = ctx.get("/products?sort=rating").await;
    assert_eq!(
        listed(&body),
        vec![
            "Jamaican Blue Mountain",
            "Costa Rican Tarrazú",
            "Ethiopian Yirgacheffe",
            "Guatemala Antigua",
            "Colombian Supremo",
            "Brazilian Santos",
        ]
    );
}

#[tokio::test]
async fn test_search_and_roast_combine() {
    let ctx = TestContext::new().await;

    let (_, body) = ctx.get("/products?q=SMOKY").await;
    assert_eq!(listed(&body), vec!["Brazilian Santos", "Guatemala Antigua"]);

    let (_, body) = ctx.get("/products?q=smoky&roast=medium").await;
    assert_eq!(listed(&body), vec!["Guatemala Antigua"]);
    assert!(body.contains("Clear Filters"));
}

#[tokio::test]
async fn test_no_matches_shows_message() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.get("/products?q=decaf").await;
    assert_eq!(status, StatusCode::OK);
    assert!(listed(&body).is_empty());
    assert!(body.contains("No products found matching your criteria."));
}

#[tokio::test]
async fn test_unknown_params_fall_back() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.get("/products?roast=burnt&sort=random").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed(&body), ALL_NAMES.to_vec());
}

#[tokio::test]
async fn test_landing_page_keeps_query() {
    let ctx = TestContext::new().await;

    let (_, body) = ctx.get("/?roast=light&sort=price-high").await;
    assert_eq!(
        listed(&body),
        vec!["Costa Rican Tarrazú", "Ethiopian Yirgacheffe"]
    );
}

#[test]
fn test_query_is_subset_of_catalog() {
    let catalog = Catalog::featured();
    for roast in ["all", "light", "medium", "dark"] {
        for sort in ["name", "price-low", "price-high", "rating"] {
            for search in ["", "o", "ca", "fruity"] {
                let state = QueryState::from_params(Some(search), Some(roast), Some(sort));
                let view = catalog.query(&state);

                assert!(view.len() <= catalog.len());
                assert!(view.iter().all(|p| state.roast_filter.admits(p.roast_level)));
                assert!(view.iter().all(|p| catalog.get(&p.id) == Some(*p)));
            }
        }
    }
}

#[test]
fn test_query_does_not_mutate_catalog() {
    let catalog = Catalog::featured();
    let before = catalog.clone();

    let state = QueryState::from_params(Some("a"), Some("medium"), Some("price-high"));
    let first = names(&catalog.query(&state));
    let second = names(&catalog.query(&state));

    assert_eq!(first, second);
    assert_eq!(catalog, before);
}

#[test]
fn test_dark_filter_admits_only_dark() {
    let catalog = Catalog::featured();
    let state = QueryState::from_params(None, Some("dark"), None);

    let view = catalog.query(&state);
    assert_eq!(view.len(), 1);
    assert_eq!(view[0].roast_level, RoastLevel::Dark);
}
