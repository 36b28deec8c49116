//! Catalog and transaction entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AlbumId, ArtistId, CartRecordId, GenreId, OrderDetailId, OrderId};
use crate::money::Price;

/// A music genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    /// Key.
    pub genre_id: GenreId,
    /// Display name, unique within the catalog.
    pub name: String,
    /// Optional blurb.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Genre {
    /// A new, unsaved genre.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            genre_id: GenreId::UNASSIGNED,
            name: name.into(),
            description: None,
        }
    }
}

/// A recording artist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    /// Key.
    pub artist_id: ArtistId,
    /// Display name.
    pub name: String,
}

impl Artist {
    /// A new, unsaved artist.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            artist_id: ArtistId::UNASSIGNED,
            name: name.into(),
        }
    }
}

/// An album for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    /// Key.
    pub album_id: AlbumId,
    /// Owning genre.
    pub genre_id: GenreId,
    /// Owning artist.
    pub artist_id: ArtistId,
    /// Title.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Where the cover image is served from.
    pub album_art_url: String,
}

/// One line of a shopping cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Key.
    pub record_id: CartRecordId,
    /// Cart the line belongs to (anonymous cart token or username).
    pub cart_id: String,
    /// Album in the line.
    pub album_id: AlbumId,
    /// Number of copies.
    pub count: u32,
    /// When the line was first created.
    pub date_created: DateTime<Utc>,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Key.
    pub order_id: OrderId,
    /// When the order was placed.
    pub order_date: DateTime<Utc>,
    /// Who placed it.
    pub username: String,
    /// Shipping first name.
    pub first_name: String,
    /// Shipping last name.
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
    /// Order total, filled in when the cart is processed.
    pub total: Price,
}

/// One line of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetail {
    /// Key.
    pub order_detail_id: OrderDetailId,
    /// Owning order.
    pub order_id: OrderId,
    /// Album purchased.
    pub album_id: AlbumId,
    /// Copies purchased.
    pub quantity: u32,
    /// Price per copy at the time of purchase.
    pub unit_price: Price,
}

impl OrderDetail {
    /// Line total.
    pub fn line_total(&self) -> Price {
        self.unit_price * self.quantity
    }
}
