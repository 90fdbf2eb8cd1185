//! Search, roast filter, and sort pipeline.

use std::cmp::Ordering;

use super::Product;
use crate::types::RoastLevel;

/// Which roasts to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoastFilter {
    #[default]
    All,
    Light,
    Medium,
    Dark,
}

impl RoastFilter {
    /// Every filter option, in the order the UI lists them.
    pub const ALL: [Self; 4] = [Self::All, Self::Light, Self::Medium, Self::Dark];

    /// Parse a form value (`all`, `light`, `medium`, `dark`), ignoring case.
    ///
    /// Unknown values select [`RoastFilter::All`].
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        value
            .parse::<RoastLevel>()
            .map_or(Self::All, Self::from)
    }

    /// The form value for this filter.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Light => "light",
            Self::Medium => "medium",
            Self::Dark => "dark",
        }
    }

    /// True when a product with `level` passes the filter.
    #[must_use]
    pub fn admits(self, level: RoastLevel) -> bool {
        match self {
            Self::All => true,
            Self::Light => level == RoastLevel::Light,
            Self::Medium => level == RoastLevel::Medium,
            Self::Dark => level == RoastLevel::Dark,
        }
    }
}

impl From<RoastLevel> for RoastFilter {
    fn from(level: RoastLevel) -> Self {
        match level {
            RoastLevel::Light => Self::Light,
            RoastLevel::Medium => Self::Medium,
            RoastLevel::Dark => Self::Dark,
        }
    }
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    #[default]
    NameAscending,
    PriceAscending,
    PriceDescending,
    RatingDescending,
}

impl SortKey {
    /// Every sort option, in the order the UI lists them.
    pub const ALL: [Self; 4] = [
        Self::NameAscending,
        Self::PriceAscending,
        Self::PriceDescending,
        Self::RatingDescending,
    ];

    /// Parse a form value (`name`, `price-low`, `price-high`, `rating`).
    ///
    /// Unknown values select [`SortKey::NameAscending`].
    #[must_use]
    pub fn from_param(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|key| key.as_param() == value.trim())
            .unwrap_or_default()
    }

    /// The form value for this sort key.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::NameAscending => "name",
            Self::PriceAscending => "price-low",
            Self::PriceDescending => "price-high",
            Self::RatingDescending => "rating",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::NameAscending => locale_compare(&a.name, &b.name),
            Self::PriceAscending => a.price.amount.cmp(&b.price.amount),
            Self::PriceDescending => b.price.amount.cmp(&a.price.amount),
            Self::RatingDescending => b.rating.cmp(&a.rating),
        }
    }
}

/// The three independent parameters of a catalog view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryState {
    pub search_term: String,
    pub roast_filter: RoastFilter,
    pub sort_key: SortKey,
}

impl QueryState {
    /// Build a query from raw form values, applying defaults for anything
    /// missing or unrecognized.
    #[must_use]
    pub fn from_params(search: Option<&str>, roast: Option<&str>, sort: Option<&str>) -> Self {
        Self {
            search_term: search.unwrap_or_default().to_string(),
            roast_filter: roast.map(RoastFilter::from_param).unwrap_or_default(),
            sort_key: sort.map(SortKey::from_param).unwrap_or_default(),
        }
    }

    /// True when search and roast filter are at their defaults.
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.search_term.is_empty() && self.roast_filter == RoastFilter::All
    }

    /// Reset search and roast filter, keeping the sort order.
    #[must_use]
    pub fn cleared(&self) -> Self {
        Self {
            sort_key: self.sort_key,
            ..Self::default()
        }
    }
}

/// Derive the shopper-visible view of `products`.
///
/// 1. Keep products whose name, origin, or a tasting note contains the
///    search term (case-insensitive); an empty term keeps everything.
/// 2. Keep products admitted by the roast filter.
/// 3. Stable-sort by the sort key; ties keep catalog order.
///
/// An empty result is a valid outcome.
#[must_use]
pub fn query<'a>(products: &'a [Product], state: &QueryState) -> Vec<&'a Product> {
    let needle = state.search_term.to_lowercase();

    let mut view: Vec<&Product> = products
        .iter()
        .filter(|product| needle.is_empty() || product.mentions(&needle))
        .filter(|product| state.roast_filter.admits(product.roast_level))
        .collect();

    // `sort_by` is stable.
    view.sort_by(|a, b| state.sort_key.compare(a, b));
    view
}

/// Dictionary-style string comparison.
///
/// Case and accents are ignored at first ("Tarrazú" sorts with "Tarrazu");
/// they only break ties, accents before case.
fn locale_compare(a: &str, b: &str) -> Ordering {
    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();

    a_lower
        .chars()
        .map(fold_accent)
        .cmp(b_lower.chars().map(fold_accent))
        .then_with(|| a_lower.cmp(&b_lower))
        .then_with(|| b.cmp(a))
}

/// Strip the diacritic from common Latin letters.
const fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}
