//! The compiled-in coffee selection.

use rust_decimal::Decimal;

use super::Product;
use crate::types::{Price, ProductId, RoastLevel};

struct Row {
    id: &'static str,
    name: &'static str,
    origin: &'static str,
    roast_level: RoastLevel,
    price_cents: i64,
    rating_tenths: i64,
    notes: [&'static str; 3],
    description: &'static str,
}

const ROWS: [Row; 6] = [
    Row {
        id: "1",
        name: "Ethiopian Yirgacheffe",
        origin: "Ethiopia",
        roast_level: RoastLevel::Light,
        price_cents: 2499,
        rating_tenths: 48,
        notes: ["Floral", "Citrus", "Tea-like"],
        description: "A bright and complex coffee with wine-like acidity and floral aromatics.",
    },
    Row {
        id: "2",
        name: "Colombian Supremo",
        origin: "Colombia",
        roast_level: RoastLevel::Medium,
        price_cents: 1999,
        rating_tenths: 46,
        notes: ["Chocolate", "Caramel", "Nutty"],
        description: "Full-bodied with rich chocolate notes and a smooth, balanced finish.",
    },
    Row {
        id: "3",
        name: "Brazilian Santos",
        origin: "Brazil",
        roast_level: RoastLevel::Dark,
        price_cents: 1799,
        rating_tenths: 44,
        notes: ["Bold", "Smoky", "Low Acid"],
        description: "A robust coffee with bold flavors and a rich, smoky finish.",
    },
    Row {
        id: "4",
        name: "Guatemala Antigua",
        origin: "Guatemala",
        roast_level: RoastLevel::Medium,
        price_cents: 2299,
        rating_tenths: 47,
        notes: ["Spicy", "Smoky", "Full Body"],
        description: "Complex flavors with spicy undertones and a distinctive smoky character.",
    },
    Row {
        id: "5",
        name: "Costa Rican Tarrazú",
        origin: "Costa Rica",
        roast_level: RoastLevel::Light,
        price_cents: 2699,
        rating_tenths: 49,
        notes: ["Bright", "Fruity", "Clean"],
        description: "Bright acidity with fruity notes and a clean, crisp finish.",
    },
    Row {
        id: "6",
        name: "Jamaican Blue Mountain",
        origin: "Jamaica",
        roast_level: RoastLevel::Medium,
        price_cents: 4999,
        rating_tenths: 50,
        notes: ["Mild", "Sweet", "Balanced"],
        description: "The world's most sought-after coffee with perfect balance and no bitterness.",
    },
];

pub(super) fn featured_coffees() -> Vec<Product> {
    ROWS.iter()
        .map(|row| Product {
            id: ProductId::new(row.id),
            name: row.name.to_string(),
            origin: row.origin.to_string(),
            roast_level: row.roast_level,
            description: row.description.to_string(),
            price: Price::from_cents(row.price_cents),
            tasting_notes: row.notes.iter().map(ToString::to_string).collect(),
            rating: Decimal::new(row.rating_tenths, 1),
            image_ref: format!("/static/images/products/{}.svg", row.id),
        })
        .collect()
}
