//! Input shapes and their field checks.
//!
//! Validation collects every failing field instead of stopping at the first,
//! so a client can fix a whole form in one round trip.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::{AlbumId, ArtistId, GenreId};
use crate::model::{Album, Order};
use crate::money::Price;
use crate::{OrderId, Result};

const MIN_ALBUM_PRICE: Price = Price::from_cents(1);
const MAX_ALBUM_PRICE: Price = Price::from_cents(10_000);

/// Ordered list of `(field, message)` validation failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(Vec<FieldError>);

/// A single failing field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Field name as it appears in the request body.
    pub field: String,
    /// Human-readable problem.
    pub message: String,
}

impl ValidationErrors {
    /// Record a failure.
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// `true` when nothing failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Failing fields in the order they were checked.
    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    /// `Ok(())` when empty, otherwise the collected errors.
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into())
        }
    }

    fn required(&mut self, field: &str, value: &str, max_len: usize, label: &str) {
        let value = value.trim();
        if value.is_empty() {
            self.push(field, format!("{label} is required"));
        } else if value.chars().count() > max_len {
            self.push(field, format!("{label} must be at most {max_len} characters"));
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Body of an album create or edit request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumInput {
    /// Genre the album is filed under.
    pub genre_id: GenreId,
    /// Artist the album is credited to.
    pub artist_id: ArtistId,
    /// Title.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Cover image URL; defaults to the placeholder when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album_art_url: Option<String>,
}

impl AlbumInput {
    /// Check every field.
    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::default();
        if self.genre_id.is_unassigned() {
            errors.push("genre_id", "Genre is required");
        }
        if self.artist_id.is_unassigned() {
            errors.push("artist_id", "Artist is required");
        }
        errors.required("title", &self.title, 160, "An Album Title");
        if self.price < MIN_ALBUM_PRICE || self.price > MAX_ALBUM_PRICE {
            errors.push("price", "Price must be between 0.01 and 100.00");
        }
        if let Some(url) = &self.album_art_url {
            if url.chars().count() > 1024 {
                errors.push("album_art_url", "Album Art URL must be at most 1024 characters");
            }
        }
        errors.into_result()
    }

    /// Build an album row from this input.
    pub fn into_album(self, album_id: AlbumId, default_art_url: &str) -> Album {
        Album {
            album_id,
            genre_id: self.genre_id,
            artist_id: self.artist_id,
            title: self.title.trim().to_string(),
            price: self.price,
            album_art_url: self
                .album_art_url
                .unwrap_or_else(|| default_art_url.to_string()),
        }
    }
}

/// Body of a checkout request (shipping and contact details).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderInput {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Street address.
    pub address: String,
    /// City.
    pub city: String,
    /// State or region.
    pub state: String,
    /// Postal code.
    pub postal_code: String,
    /// Country.
    pub country: String,
    /// Contact phone.
    pub phone: String,
    /// Contact email.
    pub email: String,
}

impl OrderInput {
    /// Check every field.
    pub fn validate(&self) -> Result<()> {
        let mut errors = ValidationErrors::default();
        errors.required("first_name", &self.first_name, 160, "First Name");
        errors.required("last_name", &self.last_name, 160, "Last Name");
        errors.required("address", &self.address, 70, "Address");
        errors.required("city", &self.city, 40, "City");
        errors.required("state", &self.state, 40, "State");
        errors.required("postal_code", &self.postal_code, 10, "Postal Code");
        errors.required("country", &self.country, 40, "Country");
        errors.required("phone", &self.phone, 24, "Phone");
        if self.email.trim().is_empty() {
            errors.push("email", "Email Address is required");
        } else if !looks_like_email(self.email.trim()) {
            errors.push("email", "Email is not valid");
        }
        errors.into_result()
    }

    /// Build an unsaved order for `username` from this input.
    pub fn into_order(self, username: &str, order_date: chrono::DateTime<chrono::Utc>) -> Order {
        Order {
            order_id: OrderId::UNASSIGNED,
            order_date,
            username: username.to_string(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            state: self.state.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
            country: self.country.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: self.email.trim().to_string(),
            total: Price::ZERO,
        }
    }
}

/// `local@domain.tld` with no whitespace and a dot after the `@`.
fn looks_like_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .rsplit_once('.')
                    .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        }
        None => false,
    }
}
