//! Café Artesano Core - Cart store, catalog queries, and shared types.
//!
//! This crate provides the state-and-query core used by every Café Artesano
//! component:
//! - `storefront` - Server-rendered demo shop
//! - `cli` - Operator tooling for the catalog and newsletter list
//!
//! # Architecture
//!
//! The core crate contains only types, pure functions, and traits - no HTTP,
//! no filesystem access. Storage is reached through the [`newsletter::ListStore`]
//! trait so the storefront and CLI can plug in their own backends.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, emails, and roast levels
//! - [`catalog`] - Fixed product catalog and the search/filter/sort pipeline
//! - [`cart`] - Cart store with derived totals and change notification
//! - [`i18n`] - Locale-keyed string lookup with fallback to the key
//! - [`newsletter`] - Subscriber capture over a key/value string-list store

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod i18n;
pub mod newsletter;
pub mod types;

pub use cart::{CartLineItem, CartStore, ProductSnapshot, SubscriptionId};
pub use catalog::{Catalog, CatalogError, Product, QueryState, RoastFilter, SortKey, query};
pub use i18n::{Locale, LocaleError, Translator, translate};
pub use newsletter::{
    ListStore, MemoryListStore, NewsletterError, SUBSCRIBERS_KEY, SubscribeOutcome, subscribe,
};
pub use types::*;
