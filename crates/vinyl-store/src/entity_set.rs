//! Keyed in-memory collections.
//!
//! [`EntitySet`] gives each entity table the add / find / update / remove and
//! predicate-query surface handlers expect from a database context. Rows live
//! in a [`DashMap`] keyed by the entity's typed id; keys come from a per-set
//! atomic sequence starting at 1.
//!
//! Every read returns owned clones. No map guard escapes this module, so
//! callers can freely interleave reads and writes on the same set.

use std::fmt;
use std::hash::Hash;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};

use dashmap::DashMap;
use vinyl_core::{
    Album, AlbumId, Artist, ArtistId, CartItem, CartRecordId, Genre, GenreId, Order,
    OrderDetail, OrderDetailId, OrderId,
};

/// A row type stored in an [`EntitySet`].
pub trait Entity: Clone + Send + Sync + 'static {
    /// Typed primary key. The raw value `0` means "not yet assigned".
    type Key: Copy
        + Eq
        + Hash
        + Ord
        + From<u32>
        + Into<u32>
        + fmt::Display
        + Send
        + Sync
        + 'static;

    /// Entity name used in not-found errors.
    const KIND: &'static str;

    /// The row's key.
    fn key(&self) -> Self::Key;

    /// Overwrite the row's key.
    fn set_key(&mut self, key: Self::Key);
}

macro_rules! impl_entity {
    ($ty:ty, $key:ty, $field:ident, $kind:literal) => {
        impl Entity for $ty {
            type Key = $key;
            const KIND: &'static str = $kind;

            fn key(&self) -> $key {
                self.$field
            }

            fn set_key(&mut self, key: $key) {
                self.$field = key;
            }
        }
    };
}

impl_entity!(Genre, GenreId, genre_id, "genre");
impl_entity!(Artist, ArtistId, artist_id, "artist");
impl_entity!(Album, AlbumId, album_id, "album");
impl_entity!(CartItem, CartRecordId, record_id, "cart item");
impl_entity!(Order, OrderId, order_id, "order");
impl_entity!(OrderDetail, OrderDetailId, order_detail_id, "order detail");

/// A concurrent keyed collection of one entity type.
pub struct EntitySet<T: Entity> {
    rows: DashMap<T::Key, T>,
    next_key: AtomicU32,
    writes: AtomicUsize,
}

impl<T: Entity> Default for EntitySet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> fmt::Debug for EntitySet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntitySet")
            .field("kind", &T::KIND)
            .field("len", &self.rows.len())
            .field("next_key", &self.next_key.load(Ordering::Relaxed))
            .finish()
    }
}

impl<T: Entity> EntitySet<T> {
    /// An empty set whose first assigned key is 1.
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
            next_key: AtomicU32::new(1),
            writes: AtomicUsize::new(0),
        }
    }

    /// Insert a row and return its key.
    ///
    /// An unassigned key is replaced with the next value from the sequence.
    /// An explicit key is kept (replacing any row with the same key) and the
    /// sequence is moved past it.
    pub fn add(&self, mut row: T) -> T::Key {
        let raw: u32 = row.key().into();
        let key = if raw == 0 {
            let key = T::Key::from(self.next_key.fetch_add(1, Ordering::SeqCst));
            row.set_key(key);
            key
        } else {
            self.next_key
                .fetch_max(raw.saturating_add(1), Ordering::SeqCst);
            row.key()
        };
        self.rows.insert(key, row);
        self.touch(1);
        key
    }

    /// Insert every row, returning the assigned keys in input order.
    pub fn add_range(&self, rows: impl IntoIterator<Item = T>) -> Vec<T::Key> {
        rows.into_iter().map(|row| self.add(row)).collect()
    }

    /// Clone of the row with `key`.
    pub fn find(&self, key: T::Key) -> Option<T> {
        self.rows.get(&key).map(|row| row.value().clone())
    }

    /// Whether a row with `key` exists.
    pub fn contains(&self, key: T::Key) -> bool {
        self.rows.contains_key(&key)
    }

    /// Replace an existing row.
    ///
    /// # Errors
    ///
    /// `NotFound` when no row has the same key.
    pub fn update(&self, row: T) -> vinyl_core::Result<()> {
        let key = row.key();
        match self.rows.get_mut(&key) {
            Some(mut existing) => {
                *existing = row;
                drop(existing);
                self.touch(1);
                Ok(())
            }
            None => Err(vinyl_core::Error::not_found(T::KIND, key)),
        }
    }

    /// Apply `f` to the row with `key` in place.
    ///
    /// Returns `None` when the row does not exist. The key must not be changed
    /// by `f`.
    pub fn modify<R>(&self, key: T::Key, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let out = {
            let mut row = self.rows.get_mut(&key)?;
            f(row.value_mut())
        };
        self.touch(1);
        Some(out)
    }

    /// Remove and return the row with `key`.
    pub fn remove(&self, key: T::Key) -> Option<T> {
        let removed = self.rows.remove(&key).map(|(_, row)| row);
        if removed.is_some() {
            self.touch(1);
        }
        removed
    }

    /// Remove every row matching `pred`, returning how many were removed.
    pub fn remove_where(&self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let mut removed = 0;
        self.rows.retain(|_, row| {
            if pred(row) {
                removed += 1;
                false
            } else {
                true
            }
        });
        self.touch(removed);
        removed
    }

    /// Every row, ordered by key.
    pub fn all(&self) -> Vec<T> {
        self.filter(|_| true)
    }

    /// Rows matching `pred`, ordered by key.
    pub fn filter(&self, mut pred: impl FnMut(&T) -> bool) -> Vec<T> {
        let mut rows: Vec<T> = self
            .rows
            .iter()
            .filter(|entry| pred(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        rows.sort_by_key(|row| row.key());
        rows
    }

    /// The lowest-keyed row matching `pred`.
    pub fn first(&self, mut pred: impl FnMut(&T) -> bool) -> Option<T> {
        self.rows
            .iter()
            .filter(|entry| pred(entry.value()))
            .min_by_key(|entry| *entry.key())
            .map(|entry| entry.value().clone())
    }

    /// Whether any row matches `pred`.
    pub fn any(&self, mut pred: impl FnMut(&T) -> bool) -> bool {
        self.rows.iter().any(|entry| pred(entry.value()))
    }

    /// Number of rows matching `pred`.
    pub fn count(&self, mut pred: impl FnMut(&T) -> bool) -> usize {
        self.rows.iter().filter(|entry| pred(entry.value())).count()
    }

    /// Drop every row and restart the key sequence at 1.
    pub fn clear(&self) {
        let removed = self.rows.len();
        self.rows.clear();
        self.next_key.store(1, Ordering::SeqCst);
        self.touch(removed);
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of row writes since the last call, resetting the counter.
    pub fn take_writes(&self) -> usize {
        self.writes.swap(0, Ordering::SeqCst)
    }

    fn touch(&self, n: usize) {
        if n > 0 {
            self.writes.fetch_add(n, Ordering::Relaxed);
        }
    }
}
