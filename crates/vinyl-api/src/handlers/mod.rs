//! Request handlers, grouped by area.

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod store;

use axum::extract::State;
use axum::http::Uri;
use axum::Json;
use serde::Serialize;
use vinyl_core::Album;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Albums shown on the home page.
pub const HOME_ALBUM_COUNT: usize = 6;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct Health {
    /// Always `"ok"`.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Albums in the catalog.
    pub albums: usize,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        albums: state.store.albums.len(),
    })
}

/// `GET /`: best sellers.
pub async fn home(State(state): State<AppState>) -> Json<Vec<Album>> {
    Json(state.store.top_selling_albums(HOME_ALBUM_COUNT))
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> ApiResult<()> {
    Err(ApiError::NotFound(format!("no resource at {}", uri.path())))
}
