//! Vinyl Core: entities, money, validation, and errors.
//!
//! This crate holds the storefront's data model. It has no internal Vinyl
//! dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`ids`]: Typed entity identifiers
//! - [`money`]: The [`Price`] amount type
//! - [`model`]: Catalog and transaction entities
//! - [`validation`]: Input shapes and their field checks

#![forbid(unsafe_code)]

pub mod error;
pub mod ids;
pub mod model;
pub mod money;
pub mod validation;

pub use error::{Error, Result};
pub use ids::{AlbumId, ArtistId, CartRecordId, GenreId, OrderDetailId, OrderId};
pub use model::{Album, Artist, CartItem, Genre, Order, OrderDetail};
pub use money::Price;
pub use validation::{AlbumInput, OrderInput, ValidationErrors};

/// Role name that grants access to catalog administration.
pub const ADMIN_ROLE: &str = "Administrator";
