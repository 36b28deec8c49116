//! Catalog administration. Mounted behind the auth layer with the
//! `Administrator` role.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use vinyl_auth::AuthenticatedUser;
use vinyl_core::{Album, AlbumId, AlbumInput};
use vinyl_store::{AlbumDetails, Lookups};

use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

/// `GET /admin/albums`
pub async fn list(State(state): State<AppState>) -> Json<Vec<AlbumDetails>> {
    Json(state.store.albums_by_price())
}

/// `GET /admin/albums/{id}`
pub async fn details(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<AlbumId>,
) -> ApiResult<Json<AlbumDetails>> {
    Ok(Json(state.store.album_details(id)?))
}

/// `GET /admin/lookups`
pub async fn lookups(State(state): State<AppState>) -> Json<Lookups> {
    Json(state.store.lookups())
}

/// `POST /admin/albums`
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiJson(input): ApiJson<AlbumInput>,
) -> ApiResult<(StatusCode, Json<Album>)> {
    let album = state.store.create_album(input)?;
    state.store.save_changes();
    tracing::info!(album_id = %album.album_id, user = %user.username, "Album created");
    Ok((StatusCode::CREATED, Json(album)))
}

/// `PUT /admin/albums/{id}`
pub async fn edit(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiPath(id): ApiPath<AlbumId>,
    ApiJson(input): ApiJson<AlbumInput>,
) -> ApiResult<Json<Album>> {
    let album = state.store.update_album(id, input)?;
    state.store.save_changes();
    tracing::info!(album_id = %id, user = %user.username, "Album updated");
    Ok(Json(album))
}

/// `DELETE /admin/albums/{id}`
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ApiPath(id): ApiPath<AlbumId>,
) -> ApiResult<Json<Album>> {
    let album = state.store.delete_album(id)?;
    state.store.save_changes();
    tracing::info!(album_id = %id, user = %user.username, "Album deleted");
    Ok(Json(album))
}
