//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{OriginalUri, Query, State};
use tracing::instrument;

use crate::content::{BREWING_METHODS, BrewingMethod, brewing_method};
use crate::error::Result;
use crate::filters;
use crate::middleware::Shopper;
use crate::routes::PageChrome;
use crate::routes::products::{CatalogQuery, CatalogView};
use crate::state::AppState;

/// A tab in the brewing guide.
#[derive(Debug, Clone)]
pub struct BrewingTab {
    pub id: &'static str,
    pub name_key: &'static str,
    pub active: bool,
    /// Landing page URL selecting this tab, keeping the catalog query.
    pub href: String,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub chrome: PageChrome,
    pub catalog: CatalogView,
    pub brewing_tabs: Vec<BrewingTab>,
    pub brewing: &'static BrewingMethod,
    pub newsletter_subscribed: bool,
}

/// Display the landing page.
#[instrument(skip(state, shopper, uri))]
pub async fn home(
    State(state): State<AppState>,
    shopper: Shopper,
    OriginalUri(uri): OriginalUri,
    Query(query): Query<CatalogQuery>,
) -> Result<HomeTemplate> {
    let current_path = uri
        .path_and_query()
        .map_or_else(|| "/".to_string(), ToString::to_string);

    let query_state = query.state();
    let brewing = brewing_method(query.method.as_deref());
    let brewing_tabs = BREWING_METHODS
        .iter()
        .map(|method| BrewingTab {
            id: method.id,
            name_key: method.name_key,
            active: method.id == brewing.id,
            href: format!(
                "/?q={}&roast={}&sort={}&method={}#brewing",
                url::form_urlencoded::byte_serialize(query_state.search_term.as_bytes())
                    .collect::<String>(),
                query_state.roast_filter.as_param(),
                query_state.sort_key.as_param(),
                method.id,
            ),
        })
        .collect();

    Ok(HomeTemplate {
        chrome: PageChrome::load(&shopper, current_path).await?,
        catalog: CatalogView::build(state.catalog(), &query_state),
        brewing_tabs,
        brewing,
        newsletter_subscribed: shopper.newsletter_subscribed().await,
    })
}
