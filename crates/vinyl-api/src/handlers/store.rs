//! Catalog browsing.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use vinyl_core::{AlbumId, Genre};
use vinyl_store::{AlbumDetails, GenreWithAlbums};

use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiPath, ApiQuery};
use crate::state::AppState;

/// Genres in the navigation menu.
pub const GENRE_MENU_SIZE: usize = 9;

/// Query of `GET /store/browse`.
#[derive(Debug, Deserialize)]
pub struct BrowseQuery {
    /// Genre name, matched exactly.
    pub genre: Option<String>,
}

/// `GET /store`
pub async fn index(State(state): State<AppState>) -> Json<Vec<Genre>> {
    Json(state.store.genres())
}

/// `GET /store/browse?genre=`
pub async fn browse(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<BrowseQuery>,
) -> ApiResult<Json<GenreWithAlbums>> {
    let genre = query
        .genre
        .filter(|g| !g.is_empty())
        .ok_or_else(|| ApiError::BadRequest("genre is required".to_string()))?;
    Ok(Json(state.store.browse(&genre)?))
}

/// `GET /store/details/{id}`
pub async fn details(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<AlbumId>,
) -> ApiResult<Json<AlbumDetails>> {
    Ok(Json(state.store.album_details(id)?))
}

/// How the genre menu is ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MenuOrder {
    /// Most copies sold first.
    #[default]
    Sales,
    /// Alphabetical.
    Name,
}

/// Query of `GET /store/genre-menu`.
#[derive(Debug, Default, Deserialize)]
pub struct GenreMenuQuery {
    /// `sales` (default) or `name`.
    #[serde(default)]
    pub order: MenuOrder,
}

/// `GET /store/genre-menu?order=sales|name`
pub async fn genre_menu(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<GenreMenuQuery>,
) -> Json<Vec<Genre>> {
    let genres = match query.order {
        MenuOrder::Sales => state.store.genre_menu(GENRE_MENU_SIZE),
        MenuOrder::Name => state.store.genres_alphabetical(GENRE_MENU_SIZE),
    };
    Json(genres)
}
