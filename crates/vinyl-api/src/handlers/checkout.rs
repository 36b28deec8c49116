//! Checkout endpoints. Mounted behind the auth layer.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use vinyl_auth::AuthenticatedUser;
use vinyl_core::{Error as CoreError, OrderId, OrderInput, Price};
use vinyl_store::checkout;

use crate::cart_id::CartId;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

/// Body of `POST /checkout`.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    /// Shipping and contact details.
    #[serde(flatten)]
    pub order: OrderInput,
    /// Promotional code.
    #[serde(default)]
    pub promo_code: String,
}

/// Body of a successful checkout.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    /// New order.
    pub order_id: OrderId,
    /// Amount charged.
    pub total: Price,
}

/// Body of `GET /checkout/complete/{id}`.
#[derive(Debug, Serialize)]
pub struct CompleteResponse {
    /// The confirmed order.
    pub order_id: OrderId,
}

/// `POST /checkout`
pub async fn address_and_payment(
    State(state): State<AppState>,
    Extension(cart_id): Extension<CartId>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(request): ApiJson<CheckoutRequest>,
) -> ApiResult<(StatusCode, Json<CheckoutResponse>)> {
    let order = checkout::checkout(
        &state.store,
        cart_id.as_str(),
        &user.username,
        request.order,
        &request.promo_code,
        chrono::Utc::now(),
    )?;
    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            order_id: order.order_id,
            total: order.total,
        }),
    ))
}

/// `GET /checkout/complete/{id}`
pub async fn complete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiPath(id): ApiPath<OrderId>,
) -> ApiResult<Json<CompleteResponse>> {
    if checkout::order_belongs_to(&state.store, id, &user.username) {
        Ok(Json(CompleteResponse { order_id: id }))
    } else {
        Err(CoreError::not_found("order", id).into())
    }
}
