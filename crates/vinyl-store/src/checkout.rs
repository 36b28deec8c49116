//! Order placement.

use chrono::{DateTime, Utc};
use vinyl_core::{Error as CoreError, Order, OrderId, OrderInput};

use crate::cart::ShoppingCart;
use crate::context::MusicStore;
use crate::error::Result;

/// The only promotional code accepted at checkout.
pub const PROMO_CODE: &str = "FREE";

/// Whether `code` matches [`PROMO_CODE`], ignoring ASCII case.
pub fn promo_code_accepted(code: &str) -> bool {
    code.eq_ignore_ascii_case(PROMO_CODE)
}

/// Place an order for `username` from the cart `cart_id`.
///
/// Checks the shipping details, then the promo code, then turns the cart into
/// order lines. Nothing is written when any check fails.
///
/// # Errors
///
/// - `Validation` when a shipping field is missing or malformed
/// - `InvalidPromoCode` when `promo_code` is not accepted
/// - `Conflict` when the cart is empty
pub fn checkout(
    store: &MusicStore,
    cart_id: &str,
    username: &str,
    input: OrderInput,
    promo_code: &str,
    now: DateTime<Utc>,
) -> Result<Order> {
    input.validate()?;
    if !promo_code_accepted(promo_code) {
        log::debug!("Checkout for {username} rejected: bad promo code");
        return Err(CoreError::InvalidPromoCode.into());
    }

    let order = ShoppingCart::for_id(store, cart_id).create_order(input.into_order(username, now))?;
    store.save_changes();
    log::info!(
        "Order {} placed by {username}, total {}",
        order.order_id,
        order.total
    );
    Ok(order)
}

/// Whether order `order_id` exists and was placed by `username`.
pub fn order_belongs_to(store: &MusicStore, order_id: OrderId, username: &str) -> bool {
    store
        .orders
        .find(order_id)
        .is_some_and(|order| order.username == username)
}
