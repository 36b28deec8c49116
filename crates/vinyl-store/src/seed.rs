//! Sample catalog and album art generation.
//!
//! The catalog ships inside the binary as `seed/catalog.toml`. Seeding an
//! empty store loads 10 genres, 55 artists and 100 albums with ids in file
//! order. [`ensure_album_art`] then gives every album a generated cover under
//! the web root.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vinyl_core::{Album, AlbumId, Artist, ArtistId, Error as CoreError, Genre, GenreId, Price};

use crate::context::MusicStore;
use crate::error::Result;
use crate::PLACEHOLDER_ART_URL;

const CATALOG_TOML: &str = include_str!("../seed/catalog.toml");

/// Web-root relative directory holding generated covers.
pub const ALBUM_ART_DIR: &str = "Images/AlbumArt";

/// The parsed seed catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedCatalog {
    /// Genres in load order.
    #[serde(rename = "genre")]
    pub genres: Vec<SeedGenre>,
}

/// One genre of the seed catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedGenre {
    /// Genre name.
    pub name: String,
    /// Optional blurb.
    #[serde(default)]
    pub description: Option<String>,
    /// Artists filed under this genre.
    pub artists: Vec<String>,
    /// Albums of this genre.
    pub albums: Vec<SeedAlbum>,
}

/// One album of the seed catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedAlbum {
    /// Title.
    pub title: String,
    /// Unit price.
    pub price: Price,
}

/// What a seeding run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedSummary {
    /// Genres added.
    pub genres: usize,
    /// Artists added.
    pub artists: usize,
    /// Albums added.
    pub albums: usize,
}

impl SeedSummary {
    /// Whether anything was inserted.
    pub fn is_empty(&self) -> bool {
        self.genres == 0 && self.artists == 0 && self.albums == 0
    }
}

impl fmt::Display for SeedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} genres, {} artists, {} albums",
            self.genres, self.artists, self.albums
        )
    }
}

/// Parse the embedded catalog.
pub fn load_catalog() -> Result<SeedCatalog> {
    Ok(toml::from_str(CATALOG_TOML)?)
}

/// Load the sample catalog into `store` unless it already holds albums.
pub fn seed(store: &MusicStore) -> Result<SeedSummary> {
    if !store.albums.is_empty() {
        log::debug!("Store already has {} albums, skipping seed", store.albums.len());
        return Ok(SeedSummary::default());
    }
    let catalog = load_catalog()?;
    let summary = seed_catalog(store, &catalog)?;
    store.save_changes();
    log::info!("Seeded {summary}");
    Ok(summary)
}

/// Clear `store` and load the sample catalog.
pub fn recreate_and_seed(store: &MusicStore) -> Result<SeedSummary> {
    store.reset();
    seed(store)
}

fn seed_catalog(store: &MusicStore, catalog: &SeedCatalog) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();

    for entry in &catalog.genres {
        if entry.artists.is_empty() && !entry.albums.is_empty() {
            return Err(CoreError::config(format!(
                "seed genre {} has albums but no artists",
                entry.name
            ))
            .into());
        }

        let genre_id = store.genres.add(Genre {
            genre_id: GenreId::UNASSIGNED,
            name: entry.name.clone(),
            description: entry.description.clone(),
        });
        summary.genres += 1;

        let artist_ids: Vec<ArtistId> = store
            .artists
            .add_range(entry.artists.iter().map(Artist::new));
        summary.artists += artist_ids.len();

        for (i, album) in entry.albums.iter().enumerate() {
            store.albums.add(Album {
                album_id: AlbumId::UNASSIGNED,
                genre_id,
                artist_id: artist_ids[i % artist_ids.len()],
                title: album.title.clone(),
                price: album.price,
                album_art_url: PLACEHOLDER_ART_URL.to_string(),
            });
            summary.albums += 1;
        }
    }
    Ok(summary)
}

/// File path of album `id`'s cover under `web_root`.
pub fn album_art_path(web_root: &Path, id: AlbumId) -> PathBuf {
    web_root
        .join(ALBUM_ART_DIR)
        .join(format!("album-{id}.png"))
}

/// URL album `id`'s cover is served from.
pub fn album_art_url(id: AlbumId) -> String {
    format!("/{ALBUM_ART_DIR}/album-{id}.png")
}

/// Make sure every album has a generated cover under `web_root`.
///
/// Albums are visited by id; the n-th album of a genre (counting from 0) gets
/// palette color n. A cover is written when its file is missing or the
/// album's URL does not point at it. Returns the number of covers written.
pub fn ensure_album_art(store: &MusicStore, web_root: &Path) -> Result<usize> {
    let genre_names: HashMap<GenreId, String> = store
        .genres
        .all()
        .into_iter()
        .map(|g| (g.genre_id, g.name))
        .collect();
    let mut per_genre: HashMap<GenreId, i64> = HashMap::new();
    let mut written = 0;

    for album in store.albums.all() {
        let counter = per_genre.entry(album.genre_id).or_insert(0);
        let index = *counter;
        *counter += 1;

        let path = album_art_path(web_root, album.album_id);
        let url = album_art_url(album.album_id);
        if path.exists() && album.album_art_url == url {
            continue;
        }

        let genre = genre_names
            .get(&album.genre_id)
            .map(String::as_str)
            .unwrap_or_default();
        vinyl_art::write_album_art(&path, genre, index)?;
        store
            .albums
            .modify(album.album_id, |a| a.album_art_url = url);
        written += 1;
    }

    store.save_changes();
    if written > 0 {
        log::info!("Generated {written} album cover(s) under {}", web_root.display());
    }
    Ok(written)
}
