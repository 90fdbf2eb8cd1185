//! Brewing guide reference content.
//!
//! Four fixed methods shown as tabs on the landing page. Method names are
//! i18n keys; the rest of the copy is English only.

/// One way to brew coffee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrewingMethod {
    /// URL-safe identifier used in `?method=`.
    pub id: &'static str,
    /// i18n key for the tab label.
    pub name_key: &'static str,
    pub time: &'static str,
    pub temperature: &'static str,
    pub ratio: &'static str,
    pub grind: &'static str,
    pub steps: &'static [&'static str],
    pub tips: &'static [&'static str],
}

/// All methods in tab order. The first is the default.
pub static BREWING_METHODS: [BrewingMethod; 4] = [
    BrewingMethod {
        id: "espresso",
        name_key: "brewing.espresso",
        time: "25-30 seconds",
        temperature: "90-96°C",
        ratio: "1:2",
        grind: "Fine",
        steps: &[
            "Dose 18-20g of finely ground coffee",
            "Level and tamp with 30lbs of pressure",
            "Lock portafilter and start extraction",
            "Aim for 25-30 second extraction time",
            "Stop when you have 36-40ml of espresso",
        ],
        tips: &[
            "Use freshly roasted beans (7-21 days old)",
            "Maintain consistent water temperature",
            "Clean equipment regularly for best taste",
        ],
    },
    BrewingMethod {
        id: "pourover",
        name_key: "brewing.pourover",
        time: "3-4 minutes",
        temperature: "88-92°C",
        ratio: "1:15",
        grind: "Medium-Fine",
        steps: &[
            "Heat water to 88-92°C",
            "Rinse filter and warm brewing vessel",
            "Add 25g medium-fine ground coffee",
            "Start timer, pour 50ml water for bloom (30s)",
            "Continue pouring in circular motions",
            "Finish brewing by 3:30-4:00",
        ],
        tips: &[
            "Pour steadily in concentric circles",
            "Maintain consistent water temperature",
            "Use a gooseneck kettle for control",
        ],
    },
    BrewingMethod {
        id: "frenchpress",
        name_key: "brewing.frenchpress",
        time: "4 minutes",
        temperature: "92-96°C",
        ratio: "1:12",
        grind: "Coarse",
        steps: &[
            "Heat water to 92-96°C",
            "Add 30g coarsely ground coffee to press",
            "Pour hot water, filling halfway and stir",
            "Add remaining water to fill press",
            "Place lid, wait 4 minutes",
            "Press down slowly and serve",
        ],
        tips: &[
            "Use coarse, even grind",
            "Don't over-extract by leaving too long",
            "Pre-heat the French press for better temperature",
        ],
    },
    BrewingMethod {
        id: "coldbrew",
        name_key: "brewing.cold",
        time: "12-24 hours",
        temperature: "Room temp",
        ratio: "1:8",
        grind: "Coarse",
        steps: &[
            "Combine 100g coarse ground coffee with 800ml room temperature water",
            "Stir to ensure all grounds are saturated",
            "Cover and steep for 12-24 hours",
            "Strain through fine mesh or filter",
            "Dilute concentrate 1:1 with water or milk",
            "Serve over ice",
        ],
        tips: &[
            "Longer steeping = stronger concentrate",
            "Store concentrate up to 2 weeks refrigerated",
            "Experiment with different coffee origins",
        ],
    },
];

/// The method with `id`, or the first method when `id` is missing or unknown.
#[must_use]
pub fn brewing_method(id: Option<&str>) -> &'static BrewingMethod {
    let [first, ..] = &BREWING_METHODS;
    id.and_then(|id| {
        BREWING_METHODS
            .iter()
            .find(|method| method.id.eq_ignore_ascii_case(id.trim()))
    })
    .unwrap_or(first)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use cafe_artesano_core::{Locale, translate};

    use super::*;

    #[test]
    fn test_lookup_by_id() {
        assert_eq!(brewing_method(Some("coldbrew")).ratio, "1:8");
        assert_eq!(brewing_method(Some("FrenchPress")).grind, "Coarse");
    }

    #[test]
    fn test_unknown_or_missing_defaults_to_espresso() {
        assert_eq!(brewing_method(None).id, "espresso");
        assert_eq!(brewing_method(Some("aeropress")).id, "espresso");
    }

    #[test]
    fn test_ids_unique_and_names_translated() {
        let ids: HashSet<_> = BREWING_METHODS.iter().map(|m| m.id).collect();
        assert_eq!(ids.len(), BREWING_METHODS.len());

        for method in &BREWING_METHODS {
            assert_ne!(translate(Locale::En, method.name_key), method.name_key);
            assert_ne!(translate(Locale::Es, method.name_key), method.name_key);
            assert!(!method.steps.is_empty());
        }
    }
}
