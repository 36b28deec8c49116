//! The store context.

use parking_lot::Mutex;
use vinyl_core::{Album, Artist, CartItem, Genre, Order, OrderDetail};

use crate::entity_set::EntitySet;

/// Every entity set of the storefront, shared by all request handlers.
///
/// Wrap in an `Arc` to share. Writes to a set are visible immediately;
/// [`MusicStore::save_changes`] only reports how many happened.
#[derive(Debug, Default)]
pub struct MusicStore {
    /// Genres.
    pub genres: EntitySet<Genre>,
    /// Artists.
    pub artists: EntitySet<Artist>,
    /// Albums.
    pub albums: EntitySet<Album>,
    /// Shopping cart lines of every cart.
    pub carts: EntitySet<CartItem>,
    /// Placed orders.
    pub orders: EntitySet<Order>,
    /// Lines of placed orders.
    pub order_details: EntitySet<OrderDetail>,
    /// Serializes multi-step cart mutations.
    pub(crate) cart_lock: Mutex<()>,
}

impl MusicStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report and reset the number of writes since the previous call.
    pub fn save_changes(&self) -> usize {
        let changes = self.genres.take_writes()
            + self.artists.take_writes()
            + self.albums.take_writes()
            + self.carts.take_writes()
            + self.orders.take_writes()
            + self.order_details.take_writes();
        if changes > 0 {
            log::debug!("Saved {changes} change(s)");
        }
        changes
    }

    /// Drop every row of every set and restart all key sequences.
    pub fn reset(&self) {
        let _guard = self.cart_lock.lock();
        self.order_details.clear();
        self.orders.clear();
        self.carts.clear();
        self.albums.clear();
        self.artists.clear();
        self.genres.clear();
        log::info!("Store reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vinyl_core::GenreId;

    #[test]
    fn test_save_changes_counts_all_sets() {
        let store = MusicStore::new();
        store.genres.add(Genre::new("Rock"));
        store.artists.add(Artist::new("Crimson Echo"));
        assert_eq!(store.save_changes(), 2);
        assert_eq!(store.save_changes(), 0);
    }

    #[test]
    fn test_reset_clears_and_restarts_keys() {
        let store = MusicStore::new();
        store.genres.add(Genre::new("Rock"));
        store.genres.add(Genre::new("Jazz"));
        store.reset();
        assert!(store.genres.is_empty());
        assert_eq!(store.genres.add(Genre::new("Pop")), GenreId(1));
    }
}
