//! Cart store.
//!
//! [`CartStore`] is the single owner of a visitor's line items. Every mutation
//! goes through its methods, which keep at most one line per product. Totals
//! are derived from the lines on every read rather than tracked separately.
//!
//! Nothing here can fail: bad quantities clamp or remove, unknown products
//! are no-ops.
//!
//! Consumers that need to react to changes (a header badge, a persistence
//! hook) register with [`CartStore::subscribe`]. Listeners run synchronously
//! after each operation that actually changed the cart.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{CurrencyCode, Price, ProductId, RoastLevel};

/// Product fields captured when an item is added.
///
/// Kept on the line so the cart renders without a catalog lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub product_id: ProductId,
    pub name: String,
    pub price: Price,
    pub image_ref: String,
    pub origin: String,
    pub roast_level: RoastLevel,
}

impl From<&Product> for ProductSnapshot {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image_ref: product.image_ref.clone(),
            origin: product.origin.clone(),
            roast_level: product.roast_level,
        }
    }
}

/// One product in the cart and how many of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(flatten)]
    pub product: ProductSnapshot,
    /// Always at least 1 while the line is in a store.
    pub quantity: u32,
}

impl CartLineItem {
    /// The product this line refers to.
    #[must_use]
    pub const fn product_id(&self) -> &ProductId {
        &self.product.product_id
    }

    /// Unit price times quantity, at full precision.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&[CartLineItem]) + Send + Sync>;

/// The authoritative set of cart line items.
#[derive(Default)]
pub struct CartStore {
    items: Vec<CartLineItem>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl CartStore {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from previously saved lines.
    ///
    /// Duplicate products are merged into the first occurrence and
    /// zero-quantity lines are dropped, so the result always satisfies the
    /// one-line-per-product invariant.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = CartLineItem>) -> Self {
        let mut store = Self::new();
        for line in items {
            if line.quantity == 0 {
                continue;
            }
            store.merge(line.product, line.quantity);
        }
        store
    }

    /// Consume the store and return its lines in insertion order.
    #[must_use]
    pub fn into_items(self) -> Vec<CartLineItem> {
        self.items
    }

    /// Current lines, first-added first.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// The line for `product_id`, if present.
    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLineItem> {
        self.items.iter().find(|line| line.product_id() == product_id)
    }

    /// True when the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add `requested_quantity` of a product.
    ///
    /// Increments the existing line for the product or appends a new one.
    /// A quantity of 0 changes nothing.
    pub fn add_item(&mut self, product: ProductSnapshot, requested_quantity: u32) {
        if requested_quantity == 0 {
            return;
        }
        self.merge(product, requested_quantity);
        self.notify();
    }

    /// Set a line's quantity. Zero or negative removes the line.
    ///
    /// Unknown products are ignored.
    pub fn update_quantity(&mut self, product_id: &ProductId, new_quantity: i64) {
        if new_quantity <= 0 {
            self.remove_item(product_id);
            return;
        }

        let quantity = u32::try_from(new_quantity).unwrap_or(u32::MAX);
        let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.product_id() == product_id)
        else {
            return;
        };

        if line.quantity != quantity {
            line.quantity = quantity;
            self.notify();
        }
    }

    /// Remove a product's line if present.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        let before = self.items.len();
        self.items.retain(|line| line.product_id() != product_id);
        if self.items.len() != before {
            self.notify();
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        if !self.items.is_empty() {
            self.items.clear();
            self.notify();
        }
    }

    /// Sum of all line quantities (the header badge number).
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.items.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of price × quantity over all lines, unrounded.
    ///
    /// A cart is single-currency: the total is in the first line's currency
    /// and lines priced in any other currency are left out. The sum
    /// saturates at [`Decimal::MAX`].
    ///
    /// Use [`Price::display`] to show it to shoppers.
    #[must_use]
    pub fn total_price(&self) -> Price {
        let currency = self
            .items
            .first()
            .map_or(CurrencyCode::default(), |line| line.product.price.currency_code);

        let amount = self
            .items
            .iter()
            .filter(|line| line.product.price.currency_code == currency)
            .map(|line| line.line_total().amount)
            .fold(Decimal::ZERO, Decimal::saturating_add);

        Price::new(amount, currency)
    }

    /// Register a listener called with the lines after every change.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&[CartLineItem]) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Stop notifying a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn merge(&mut self, product: ProductSnapshot, quantity: u32) {
        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.product.product_id == product.product_id)
        {
            line.quantity = line.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartLineItem { product, quantity });
        }
    }

    fn notify(&self) {
        for (_, listener) in &self.listeners {
            listener(&self.items);
        }
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}
