//! Shopping carts.
//!
//! A cart is the set of [`CartItem`] rows sharing a cart id. Anonymous
//! shoppers get a random token as cart id; once they sign in the lines are
//! moved to their username with [`ShoppingCart::migrate_cart`].
//!
//! Multi-step mutations hold the store's cart lock so two concurrent adds of
//! the same album cannot both create a line.

use chrono::Utc;
use serde::Serialize;
use vinyl_core::{
    Album, AlbumId, CartItem, CartRecordId, Error as CoreError, Order, OrderDetail,
    OrderDetailId, Price,
};

use crate::context::MusicStore;
use crate::error::Result;

/// A cart line with its album.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLine {
    /// The stored line.
    #[serde(flatten)]
    pub item: CartItem,
    /// The album in the line.
    pub album: Album,
}

impl CartLine {
    /// `count × price`.
    pub fn line_total(&self) -> Price {
        self.album.price * self.item.count
    }
}

/// Operations on one cart.
#[derive(Debug, Clone)]
pub struct ShoppingCart<'a> {
    store: &'a MusicStore,
    cart_id: String,
}

impl<'a> ShoppingCart<'a> {
    /// The cart with `cart_id` in `store`.
    pub fn for_id(store: &'a MusicStore, cart_id: impl Into<String>) -> Self {
        Self {
            store,
            cart_id: cart_id.into(),
        }
    }

    /// This cart's id.
    pub fn cart_id(&self) -> &str {
        &self.cart_id
    }

    /// Add one copy of `album_id`, returning the updated line.
    pub fn add_to_cart(&self, album_id: AlbumId) -> Result<CartItem> {
        let _guard = self.store.cart_lock.lock();
        if !self.store.albums.contains(album_id) {
            return Err(CoreError::not_found("album", album_id).into());
        }

        let existing = self
            .store
            .carts
            .first(|line| line.cart_id == self.cart_id && line.album_id == album_id);
        let item = match existing {
            Some(line) => self
                .store
                .carts
                .modify(line.record_id, |line| {
                    line.count += 1;
                    line.clone()
                })
                .ok_or_else(|| CoreError::not_found("cart item", line.record_id))?,
            None => {
                let mut line = CartItem {
                    record_id: CartRecordId::UNASSIGNED,
                    cart_id: self.cart_id.clone(),
                    album_id,
                    count: 1,
                    date_created: Utc::now(),
                };
                line.record_id = self.store.carts.add(line.clone());
                line
            }
        };
        log::debug!(
            "Cart {}: album {album_id} x{}",
            self.cart_id,
            item.count
        );
        Ok(item)
    }

    /// Remove one copy of the line `record_id`, returning how many remain.
    ///
    /// The line is deleted when its last copy goes.
    pub fn remove_from_cart(&self, record_id: CartRecordId) -> Result<u32> {
        let _guard = self.store.cart_lock.lock();
        let line = self
            .store
            .carts
            .find(record_id)
            .filter(|line| line.cart_id == self.cart_id)
            .ok_or_else(|| CoreError::not_found("cart item", record_id))?;

        if line.count > 1 {
            let remaining = self
                .store
                .carts
                .modify(record_id, |line| {
                    line.count -= 1;
                    line.count
                })
                .unwrap_or(0);
            Ok(remaining)
        } else {
            self.store.carts.remove(record_id);
            Ok(0)
        }
    }

    /// Delete every line of this cart.
    pub fn empty_cart(&self) -> usize {
        let _guard = self.store.cart_lock.lock();
        self.clear_lines()
    }

    /// Lines of this cart with their albums, by record id.
    pub fn cart_items(&self) -> Vec<CartLine> {
        self.store
            .carts
            .filter(|line| line.cart_id == self.cart_id)
            .into_iter()
            .filter_map(|item| {
                let album = self.store.albums.find(item.album_id)?;
                Some(CartLine { item, album })
            })
            .collect()
    }

    /// Total number of copies in the cart.
    pub fn count(&self) -> u32 {
        self.store
            .carts
            .filter(|line| line.cart_id == self.cart_id)
            .iter()
            .map(|line| line.count)
            .sum()
    }

    /// Sum of `count × price` over the cart.
    pub fn total(&self) -> Price {
        self.cart_items().iter().map(CartLine::line_total).sum()
    }

    /// Turn the cart into order lines for `order`.
    ///
    /// Saves `order` first when it has no id yet, writes one detail per cart
    /// line at the album's current price, stores the total on the order, and
    /// empties the cart. Returns the saved order.
    ///
    /// # Errors
    ///
    /// `Conflict` when the cart is empty.
    pub fn create_order(&self, mut order: Order) -> Result<Order> {
        let _guard = self.store.cart_lock.lock();
        let lines = self.cart_items();
        if lines.is_empty() {
            return Err(CoreError::conflict("Shopping cart is empty").into());
        }

        if order.order_id.is_unassigned() {
            order.order_id = self.store.orders.add(order.clone());
        }

        let mut total = Price::ZERO;
        for line in &lines {
            let detail = OrderDetail {
                order_detail_id: OrderDetailId::UNASSIGNED,
                order_id: order.order_id,
                album_id: line.album.album_id,
                quantity: line.item.count,
                unit_price: line.album.price,
            };
            total = total + detail.line_total();
            self.store.order_details.add(detail);
        }

        order.total = total;
        self.store.orders.update(order.clone())?;
        self.clear_lines();
        log::info!(
            "Order {} created from cart {} ({} line(s), total {total})",
            order.order_id,
            self.cart_id,
            lines.len()
        );
        Ok(order)
    }

    /// Move this cart's lines to the cart `username`, merging lines for the
    /// same album. Returns the number of lines moved or merged.
    pub fn migrate_cart(&self, username: &str) -> usize {
        if username == self.cart_id {
            return 0;
        }
        let _guard = self.store.cart_lock.lock();
        let lines = self
            .store
            .carts
            .filter(|line| line.cart_id == self.cart_id);
        for line in &lines {
            let target = self
                .store
                .carts
                .first(|other| other.cart_id == username && other.album_id == line.album_id);
            match target {
                Some(target) => {
                    self.store
                        .carts
                        .modify(target.record_id, |t| t.count += line.count);
                    self.store.carts.remove(line.record_id);
                }
                None => {
                    self.store
                        .carts
                        .modify(line.record_id, |l| l.cart_id = username.to_string());
                }
            }
        }
        if !lines.is_empty() {
            log::debug!("Migrated {} cart line(s) to {username}", lines.len());
        }
        lines.len()
    }

    fn clear_lines(&self) -> usize {
        self.store
            .carts
            .remove_where(|line| line.cart_id == self.cart_id)
    }
}
