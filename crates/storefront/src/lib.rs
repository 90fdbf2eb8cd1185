//! Café Artesano Storefront library.
//!
//! Server-rendered demo coffee shop: catalog browsing with search, roast
//! filter, and sort; a session-backed cart with simulated checkout; a
//! brewing guide; newsletter signup; and an English/Spanish UI.
//!
//! The crate is a library so the router can be driven from tests; the
//! binary in `main.rs` adds tracing, Sentry, and the listener.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod content;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;

pub use routes::app;
