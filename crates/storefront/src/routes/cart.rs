//! Cart route handlers.
//!
//! The cart lives in the session as a list of line items. Each handler loads
//! it into a [`CartStore`](cafe_artesano_core::CartStore), applies one
//! operation, and saves it back only if something changed. Forms post here
//! and are redirected back to the page they came from.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tracing::instrument;

use cafe_artesano_core::{CartLineItem, CartStore, ProductId, ProductSnapshot};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::filters;
use crate::middleware::Shopper;
use crate::models::Toast;
use crate::routes::{FormInput, PageChrome, safe_return_to};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub product_id: String,
    pub name: String,
    pub origin: String,
    pub roast_name: &'static str,
    pub image_ref: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl From<&CartLineItem> for CartItemView {
    fn from(line: &CartLineItem) -> Self {
        Self {
            product_id: line.product_id().to_string(),
            name: line.product.name.clone(),
            origin: line.product.origin.clone(),
            roast_name: line.product.roast_level.name(),
            image_ref: line.product.image_ref.clone(),
            quantity: line.quantity,
            price: line.product.price.display(),
            line_price: line.line_total().display(),
        }
    }
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u64,
}

impl From<&CartStore> for CartView {
    fn from(cart: &CartStore) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            total: cart.total_price().display(),
            item_count: cart.total_item_count(),
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
    pub quantity: Option<u32>,
    pub return_to: Option<String>,
}

/// Update cart form data. Zero or negative removes the line.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: String,
    pub quantity: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub chrome: PageChrome,
    pub cart: CartView,
}

/// Cart count badge fragment template.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u64,
}

/// Display cart page.
#[instrument(skip(shopper))]
pub async fn show(shopper: Shopper) -> Result<CartShowTemplate> {
    let cart = shopper.cart().await?;

    Ok(CartShowTemplate {
        chrome: PageChrome::load(&shopper, "/cart").await?,
        cart: CartView::from(&cart),
    })
}

/// Get cart count badge.
#[instrument(skip(shopper))]
pub async fn count(shopper: Shopper) -> Result<CartCountTemplate> {
    let count = shopper.cart().await?.total_item_count();
    Ok(CartCountTemplate { count })
}

/// Add item to cart.
///
/// Unknown products are a 404; a quantity of 0 changes nothing.
#[instrument(skip(state, shopper))]
pub async fn add(
    State(state): State<AppState>,
    shopper: Shopper,
    form: FormInput<AddToCartForm>,
) -> Result<Redirect> {
    let Form(form) = form?;
    let product_id = ProductId::new(form.product_id.trim());
    let product = state
        .catalog()
        .get(&product_id)
        .ok_or_else(|| AppError::NotFound(format!("product {product_id}")))?;

    let quantity = form.quantity.unwrap_or(1);
    let snapshot = ProductSnapshot::from(product);
    let cart = shopper
        .update_cart(|cart| cart.add_item(snapshot, quantity))
        .await?;

    if quantity > 0 {
        add_breadcrumb("cart", "Added to cart", &[("product_id", product_id.as_str())]);
        tracing::info!(
            product_id = %product_id,
            quantity,
            cart_count = cart.total_item_count(),
            "Added to cart"
        );
        shopper
            .push_toast(
                Toast::success("Added to cart!")
                    .with_description(format!("{} has been added to your cart.", product.name)),
            )
            .await?;
    }

    Ok(Redirect::to(&safe_return_to(
        form.return_to.as_deref(),
        "/",
    )))
}

/// Update cart item quantity.
#[instrument(skip(shopper))]
pub async fn update(shopper: Shopper, form: FormInput<UpdateCartForm>) -> Result<Redirect> {
    let Form(form) = form?;
    let product_id = ProductId::new(form.product_id.trim());
    shopper
        .update_cart(|cart| cart.update_quantity(&product_id, form.quantity))
        .await?;

    Ok(Redirect::to("/cart"))
}

/// Remove item from cart.
#[instrument(skip(shopper))]
pub async fn remove(shopper: Shopper, form: FormInput<RemoveFromCartForm>) -> Result<Redirect> {
    let Form(form) = form?;
    let product_id = ProductId::new(form.product_id.trim());
    shopper
        .update_cart(|cart| cart.remove_item(&product_id))
        .await?;

    Ok(Redirect::to("/cart"))
}

/// Empty the cart.
#[instrument(skip(shopper))]
pub async fn clear(shopper: Shopper) -> Result<Redirect> {
    shopper.update_cart(CartStore::clear).await?;
    Ok(Redirect::to("/cart"))
}

/// Simulated checkout.
///
/// Waits the configured processing delay, then empties the cart. There is
/// no payment step.
#[instrument(skip(state, shopper))]
pub async fn checkout(State(state): State<AppState>, shopper: Shopper) -> Result<Redirect> {
    let cart = shopper.cart().await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart"));
    }

    let total = cart.total_price();
    shopper
        .push_toast(
            Toast::info("Checkout initiated")
                .with_description("This is a demo - no real payment processing."),
        )
        .await?;

    tokio::time::sleep(state.config().checkout_delay).await;

    shopper.update_cart(CartStore::clear).await?;
    shopper
        .push_toast(Toast::success("Order confirmed!").with_description(
            "Thank you for your purchase. Order confirmation sent to your email.",
        ))
        .await?;

    let total_display = total.display();
    add_breadcrumb("cart", "Checkout completed", &[("total", total_display.as_str())]);
    tracing::info!(
        items = cart.total_item_count(),
        total = %total,
        "Checkout completed"
    );

    Ok(Redirect::to("/"))
}
