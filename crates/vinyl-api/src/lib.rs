//! # vinyl-api
//!
//! JSON HTTP surface of the Vinyl storefront, built on axum.
//!
//! - [`create_router`]: the route table with auth layers and request tracing
//! - [`Server`]: binding, serving, and graceful shutdown
//! - [`prepare_store`]: startup seeding and album art generation
//! - [`ApiError`]: error to JSON response mapping

#![forbid(unsafe_code)]

pub mod cart_id;
mod error;
mod extract;
pub mod handlers;
mod router;
mod server;
mod state;

pub use cart_id::{CartId, CART_ID_HEADER};
pub use error::{ApiError, ApiResult};
pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use router::create_router;
pub use server::{prepare_store, Server};
pub use state::AppState;
