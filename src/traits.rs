//! # Cache Traits
//!
//! The call surface a driver (demo, benchmark, profiler) needs to exercise a
//! cache without naming its concrete type.
//!
//! ```text
//!   ┌─────────────────────────────────────┐
//!   │        ReadOnlyCache<K, V>          │
//!   │                                     │
//!   │  has(&, &K) → bool                  │
//!   │  len(&) → usize                     │
//!   │  is_empty(&) → bool                 │
//!   │  capacity(&) → usize                │
//!   └──────────────────┬──────────────────┘
//!                      │
//!                      ▼
//!   ┌─────────────────────────────────────┐
//!   │          CoreCache<K, V>            │
//!   │                                     │
//!   │  put(&mut, K, V)                    │
//!   │  get(&mut, &K) → Option<&V>         │
//!   │  clear(&mut)                        │
//!   └─────────────────────────────────────┘
//! ```
//!
//! `put` returns nothing: whether the key was new, a tombstone, or already
//! resident is a policy decision the caller does not observe. There is no
//! `remove`; entries leave only through eviction.

/// Non-mutating queries.
pub trait ReadOnlyCache<K, V> {
    /// Returns `true` if the cache is tracking `key`.
    ///
    /// Policies that keep metadata-only records (ghost entries) report those
    /// too, so `has` can be `true` while [`CoreCache::get`] misses.
    fn has(&self, key: &K) -> bool;

    /// Number of entries that currently hold a value.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of entries that can hold a value at once.
    fn capacity(&self) -> usize;
}

/// Insertion and lookup.
///
/// # Example
///
/// ```
/// use s3fifo::policy::s3_fifo::S3FifoCache;
/// use s3fifo::traits::{CoreCache, ReadOnlyCache};
///
/// fn warm<C: CoreCache<u64, u64>>(cache: &mut C, keys: &[u64]) {
///     for &k in keys {
///         if cache.get(&k).is_none() {
///             cache.put(k, k * 10);
///         }
///     }
/// }
///
/// let mut cache = S3FifoCache::new(8, 2);
/// warm(&mut cache, &[1, 2, 3]);
/// assert_eq!(cache.len(), 3);
/// assert!(cache.has(&1));
/// ```
pub trait CoreCache<K, V>: ReadOnlyCache<K, V> {
    /// Offers `key`/`value` to the cache. May evict to make room.
    fn put(&mut self, key: K, value: V);

    /// Returns the value for `key` if resident, recording the access.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Drops every entry and all bookkeeping.
    fn clear(&mut self);
}
