//! Shopping cart endpoints.

use std::collections::BTreeSet;

use axum::extract::State;
use axum::{Extension, Json};
use serde::Serialize;
use vinyl_core::{AlbumId, CartRecordId, Error as CoreError, Price};
use vinyl_store::{CartLine, ShoppingCart};

use crate::cart_id::CartId;
use crate::error::ApiResult;
use crate::extract::ApiPath;
use crate::state::AppState;

/// Body of `GET /cart` and `POST /cart/add/{id}`.
#[derive(Debug, Serialize)]
pub struct CartView {
    /// Lines with their albums.
    pub cart_items: Vec<CartLine>,
    /// Sum over all lines.
    pub cart_total: Price,
}

/// Body of `POST /cart/remove/{id}`.
#[derive(Debug, Serialize)]
pub struct CartRemoveView {
    /// Human-readable outcome.
    pub message: String,
    /// New cart total.
    pub cart_total: Price,
    /// Copies left in the cart.
    pub cart_count: u32,
    /// Copies left in the affected line.
    pub item_count: u32,
    /// The line that was touched.
    pub delete_id: CartRecordId,
}

/// Body of `GET /cart/summary`.
#[derive(Debug, Serialize)]
pub struct CartSummary {
    /// Copies in the cart.
    pub cart_count: u32,
    /// Distinct album titles, sorted.
    pub titles: Vec<String>,
}

fn view(cart: &ShoppingCart<'_>) -> CartView {
    let cart_items = cart.cart_items();
    let cart_total = cart_items.iter().map(CartLine::line_total).sum();
    CartView {
        cart_items,
        cart_total,
    }
}

/// Message shown after removing a copy of `title`.
pub fn removal_message(title: &str, item_count: u32) -> String {
    if item_count > 0 {
        format!(" 1 copy of {title} has been removed from your shopping cart.")
    } else {
        format!("{title} has been removed from your shopping cart.")
    }
}

/// `GET /cart`
pub async fn index(
    State(state): State<AppState>,
    Extension(cart_id): Extension<CartId>,
) -> Json<CartView> {
    let cart = ShoppingCart::for_id(&state.store, cart_id.as_str());
    Json(view(&cart))
}

/// `POST /cart/add/{id}`
pub async fn add(
    State(state): State<AppState>,
    Extension(cart_id): Extension<CartId>,
    ApiPath(id): ApiPath<AlbumId>,
) -> ApiResult<Json<CartView>> {
    let cart = ShoppingCart::for_id(&state.store, cart_id.as_str());
    cart.add_to_cart(id)?;
    state.store.save_changes();
    Ok(Json(view(&cart)))
}

/// `POST /cart/remove/{id}`
pub async fn remove(
    State(state): State<AppState>,
    Extension(cart_id): Extension<CartId>,
    ApiPath(id): ApiPath<CartRecordId>,
) -> ApiResult<Json<CartRemoveView>> {
    let cart = ShoppingCart::for_id(&state.store, cart_id.as_str());
    let title = cart
        .cart_items()
        .into_iter()
        .find(|line| line.item.record_id == id)
        .map(|line| line.album.title)
        .ok_or_else(|| CoreError::not_found("cart item", id))?;

    let item_count = cart.remove_from_cart(id)?;
    state.store.save_changes();

    Ok(Json(CartRemoveView {
        message: removal_message(&title, item_count),
        cart_total: cart.total(),
        cart_count: cart.count(),
        item_count,
        delete_id: id,
    }))
}

/// `GET /cart/summary`
pub async fn summary(
    State(state): State<AppState>,
    Extension(cart_id): Extension<CartId>,
) -> Json<CartSummary> {
    let cart = ShoppingCart::for_id(&state.store, cart_id.as_str());
    let titles: BTreeSet<String> = cart
        .cart_items()
        .into_iter()
        .map(|line| line.album.title)
        .collect();
    Json(CartSummary {
        cart_count: cart.count(),
        titles: titles.into_iter().collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removal_message() {
        assert_eq!(
            removal_message("Disco Fever", 2),
            " 1 copy of Disco Fever has been removed from your shopping cart."
        );
        assert_eq!(
            removal_message("Disco Fever", 0),
            "Disco Fever has been removed from your shopping cart."
        );
    }
}
