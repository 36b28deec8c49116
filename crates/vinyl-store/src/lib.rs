//! # vinyl-store
//!
//! In-memory data layer for the Vinyl storefront.
//!
//! This crate provides:
//! - [`EntitySet`]: a keyed collection with add / find / remove / query over
//!   a concurrent map, so callers read like they would against a database
//!   context
//! - [`MusicStore`]: the context holding every set, plus catalog queries and
//!   album administration
//! - [`ShoppingCart`]: cart lines, totals, and order creation
//! - [`checkout`]: promo-code gated order placement
//! - [`seed`]: the fixed sample catalog and album art generation

#![forbid(unsafe_code)]

mod catalog;
pub mod cart;
pub mod checkout;
mod context;
pub mod entity_set;
pub mod error;
pub mod seed;

pub use cart::{CartLine, ShoppingCart};
pub use catalog::{AlbumDetails, GenreWithAlbums, Lookups};
pub use context::MusicStore;
pub use entity_set::{Entity, EntitySet};
pub use error::{Error, Result};

/// Cover URL for albums without generated art.
pub const PLACEHOLDER_ART_URL: &str = "/Content/Images/placeholder.svg";
