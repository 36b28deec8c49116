//! Cart identity for anonymous shoppers.
//!
//! Clients send their cart token in `X-Cart-Id`. Requests without a usable
//! token get a fresh UUID, and every response echoes the token in use.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

/// Header carrying the cart token.
pub const CART_ID_HEADER: &str = "x-cart-id";

const MAX_CART_ID_LEN: usize = 128;

/// The cart token of the current request, stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartId(pub String);

impl CartId {
    /// A new random token.
    pub fn mint() -> Self {
        CartId(uuid::Uuid::new_v4().to_string())
    }

    /// The token as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn parse(value: &HeaderValue) -> Option<CartId> {
    let raw = value.to_str().ok()?.trim();
    let usable = !raw.is_empty()
        && raw.len() <= MAX_CART_ID_LEN
        && raw.bytes().all(|b| b.is_ascii_graphic());
    usable.then(|| CartId(raw.to_string()))
}

/// Attach a [`CartId`] to the request and echo it on the response.
pub async fn cart_id_middleware(mut req: Request, next: Next) -> Response {
    let cart_id = req
        .headers()
        .get(CART_ID_HEADER)
        .and_then(parse)
        .unwrap_or_else(|| {
            let minted = CartId::mint();
            tracing::debug!(cart_id = %minted.0, "Minted cart id");
            minted
        });
    req.extensions_mut().insert(cart_id.clone());

    let mut resp = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&cart_id.0) {
        resp.headers_mut().insert(CART_ID_HEADER, value);
    }
    resp
}
