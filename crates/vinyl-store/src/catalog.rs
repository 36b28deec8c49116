//! Catalog queries and album administration.

use std::cmp::Reverse;
use std::collections::HashMap;

use serde::Serialize;
use vinyl_core::{
    Album, AlbumId, AlbumInput, Artist, Error as CoreError, Genre, GenreId, ValidationErrors,
};

use crate::context::MusicStore;
use crate::error::Result;
use crate::PLACEHOLDER_ART_URL;

/// A genre together with its albums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreWithAlbums {
    /// The genre.
    #[serde(flatten)]
    pub genre: Genre,
    /// Albums in the genre, by id.
    pub albums: Vec<Album>,
}

/// An album with its genre and artist resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumDetails {
    /// The album.
    #[serde(flatten)]
    pub album: Album,
    /// Genre, if it still exists.
    pub genre: Option<Genre>,
    /// Artist, if it still exists.
    pub artist: Option<Artist>,
}

/// Select-list data for the album editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lookups {
    /// Genres by name.
    pub genres: Vec<Genre>,
    /// Artists by name.
    pub artists: Vec<Artist>,
}

impl MusicStore {
    /// All genres, by id.
    pub fn genres(&self) -> Vec<Genre> {
        self.genres.all()
    }

    /// The genre named exactly `name`, with its albums.
    pub fn browse(&self, name: &str) -> Result<GenreWithAlbums> {
        let genre = self
            .genres
            .first(|g| g.name == name)
            .ok_or_else(|| CoreError::not_found("genre", name))?;
        let albums = self.albums.filter(|a| a.genre_id == genre.genre_id);
        Ok(GenreWithAlbums { genre, albums })
    }

    /// One album with genre and artist.
    pub fn album_details(&self, id: AlbumId) -> Result<AlbumDetails> {
        let album = self.album(id)?;
        Ok(self.details(album))
    }

    /// One album.
    pub fn album(&self, id: AlbumId) -> Result<Album> {
        Ok(self
            .albums
            .find(id)
            .ok_or_else(|| CoreError::not_found("album", id))?)
    }

    /// The `n` albums with the most order lines. Ties go to the lower id.
    pub fn top_selling_albums(&self, n: usize) -> Vec<Album> {
        let mut lines: HashMap<AlbumId, usize> = HashMap::new();
        for detail in self.order_details.all() {
            *lines.entry(detail.album_id).or_default() += 1;
        }
        let mut albums = self.albums.all();
        albums.sort_by_key(|a| (Reverse(lines.get(&a.album_id).copied().unwrap_or(0)), a.album_id));
        albums.truncate(n);
        albums
    }

    /// The `n` genres with the most copies sold. Ties go by name.
    pub fn genre_menu(&self, n: usize) -> Vec<Genre> {
        let album_genres: HashMap<AlbumId, GenreId> = self
            .albums
            .all()
            .into_iter()
            .map(|a| (a.album_id, a.genre_id))
            .collect();
        let mut sold: HashMap<GenreId, u64> = HashMap::new();
        for detail in self.order_details.all() {
            if let Some(genre_id) = album_genres.get(&detail.album_id) {
                *sold.entry(*genre_id).or_default() += u64::from(detail.quantity);
            }
        }
        let mut genres = self.genres.all();
        genres.sort_by(|a, b| {
            let sold_a = sold.get(&a.genre_id).copied().unwrap_or(0);
            let sold_b = sold.get(&b.genre_id).copied().unwrap_or(0);
            sold_b.cmp(&sold_a).then_with(|| a.name.cmp(&b.name))
        });
        genres.truncate(n);
        genres
    }

    /// The first `n` genres by name.
    pub fn genres_alphabetical(&self, n: usize) -> Vec<Genre> {
        let mut genres = self.genres.all();
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        genres.truncate(n);
        genres
    }

    /// Every album with genre and artist, cheapest first. Ties go to the lower id.
    pub fn albums_by_price(&self) -> Vec<AlbumDetails> {
        let mut albums = self.albums.all();
        albums.sort_by_key(|a| (a.price, a.album_id));
        albums.into_iter().map(|a| self.details(a)).collect()
    }

    /// Genres and artists, each sorted by name.
    pub fn lookups(&self) -> Lookups {
        let mut genres = self.genres.all();
        genres.sort_by(|a, b| a.name.cmp(&b.name));
        let mut artists = self.artists.all();
        artists.sort_by(|a, b| a.name.cmp(&b.name));
        Lookups { genres, artists }
    }

    /// Validate `input` and add it as a new album.
    ///
    /// Albums created without an art URL point at the placeholder image.
    pub fn create_album(&self, input: AlbumInput) -> Result<Album> {
        input.validate()?;
        self.check_references(&input)?;
        let mut album = input.into_album(AlbumId::UNASSIGNED, PLACEHOLDER_ART_URL);
        album.album_id = self.albums.add(album.clone());
        log::info!("Created album {} ({})", album.album_id, album.title);
        Ok(album)
    }

    /// Validate `input` and replace album `id` with it.
    ///
    /// Omitting the art URL keeps the current one.
    pub fn update_album(&self, id: AlbumId, input: AlbumInput) -> Result<Album> {
        let current = self.album(id)?;
        input.validate()?;
        self.check_references(&input)?;
        let album = input.into_album(id, &current.album_art_url);
        self.albums.update(album.clone())?;
        log::info!("Updated album {id}");
        Ok(album)
    }

    /// Delete album `id` and every cart line holding it.
    ///
    /// Order lines keep their reference so past orders stay intact.
    pub fn delete_album(&self, id: AlbumId) -> Result<Album> {
        let _guard = self.cart_lock.lock();
        let album = self
            .albums
            .remove(id)
            .ok_or_else(|| CoreError::not_found("album", id))?;
        let lines = self.carts.remove_where(|line| line.album_id == id);
        log::info!("Deleted album {id} ({lines} cart line(s) dropped)");
        Ok(album)
    }

    fn details(&self, album: Album) -> AlbumDetails {
        AlbumDetails {
            genre: self.genres.find(album.genre_id),
            artist: self.artists.find(album.artist_id),
            album,
        }
    }

    fn check_references(&self, input: &AlbumInput) -> Result<()> {
        let mut errors = ValidationErrors::default();
        if !self.genres.contains(input.genre_id) {
            errors.push("genre_id", format!("Genre {} does not exist", input.genre_id));
        }
        if !self.artists.contains(input.artist_id) {
            errors.push("artist_id", format!("Artist {} does not exist", input.artist_id));
        }
        Ok(errors.into_result()?)
    }
}
