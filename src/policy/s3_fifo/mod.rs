//! S3-FIFO (Simple, Scalable, Scan-resistant FIFO) Cache
//!
//! Three FIFO queues and a small per-item visit counter replace LRU list
//! relinking. New keys are admitted to a small probationary queue; keys that
//! are reused while waiting there earn a place in the main queue; keys that
//! are not reused leave behind a value-less tombstone in the ghost queue so a
//! quick return can go straight to main.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │                        S3FifoCache<K, V> Layout                          │
//! │                                                                          │
//! │   index: FxHashMap<K, SlotId>     arena: SlotArena<Node<K, V>>           │
//! │   ┌──────────┬──────────┐         ┌─────┬───────────────────────────┐    │
//! │   │   Key    │  SlotId  │         │ Idx │ key, value, visits, where │    │
//! │   ├──────────┼──────────┤         ├─────┼───────────────────────────┤    │
//! │   │    1     │   id(0)  │────────►│  0  │ 1, Some(v), 3, Main       │    │
//! │   │    3     │   id(2)  │────────►│  2  │ 3, None,    0, Ghost      │    │
//! │   │    7     │   id(5)  │────────►│  5  │ 7, Some(v), 0, Small      │    │
//! │   └──────────┴──────────┘         └─────┴───────────────────────────┘    │
//! │                                                                          │
//! │   SMALL: head ──► ... ──► tail    (capacity = small)                     │
//! │   MAIN:  head ──► ... ──► tail    (capacity = main, clock sweep)         │
//! │   GHOST: head ──► ... ──► tail    (capacity = small, tombstones only)    │
//! └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Item life cycle
//!
//! ```text
//!                 put (new key)
//!                      │
//!                      ▼
//!                 ┌─────────┐  tail, visits > 0   ┌─────────┐  tail, visits > 0
//!                 │  SMALL  │ ──────────────────► │  MAIN   │ ◄──────┐ (visits -= 1,
//!                 └────┬────┘                     └────┬────┘ ───────┘  back to head)
//!        tail,         │                  ▲            │ tail, visits == 0
//!        visits == 0   ▼                  │            ▼
//!                 ┌─────────┐  put (re-admit)     (dropped)
//!                 │  GHOST  │ ────────────┘
//!                 └────┬────┘
//!                      │ tail
//!                      ▼
//!                 (forgotten)
//! ```
//!
//! Every queue evicts *before* pushing, so no queue ever exceeds its
//! capacity, and an item's visit count is reset whenever it changes queue.
//!
//! ## Lookup semantics
//!
//! | Key state  | `get`              | `has`  | `put`                          |
//! |------------|--------------------|--------|--------------------------------|
//! | unknown    | `None`             | false  | admit to Small                 |
//! | Small/Main | `Some`, visits + 1 | true   | visits + 1, value kept         |
//! | Ghost      | `None`             | true   | re-admit to Main with value    |
//!
//! A redundant `put` never reorders anything; promotion happens lazily when
//! the item reaches a queue tail.
//!
//! ## Example Usage
//!
//! ```
//! use s3fifo::policy::s3_fifo::{Location, S3FifoCache};
//!
//! let mut cache = S3FifoCache::new(10, 2);
//!
//! cache.put(1, "one");
//! cache.put(2, "two");
//! cache.get(&1);          // 1 is reused while in Small
//! cache.put(3, "three");  // Small is full: 1 is promoted, not dropped
//! cache.put(4, "four");   // 2 was never reused: it becomes a tombstone
//!
//! assert_eq!(cache.location(&1), Some(Location::Main));
//! assert_eq!(cache.location(&2), Some(Location::Ghost));
//! assert!(cache.has(&2));
//! assert_eq!(cache.get(&2), None);
//!
//! cache.put(2, "two again"); // back before the tombstone expired
//! assert_eq!(cache.location(&2), Some(Location::Main));
//! ```

mod snapshot;
mod table;

use std::fmt::Debug;
use std::hash::Hash;

use tracing::{debug, error, trace};

use crate::builder::S3FifoBuilder;
#[cfg(debug_assertions)]
use crate::ds::Linked;
use crate::ds::{LinkedQueue, SlotId};
use crate::error::{ConfigError, InvariantError};
use crate::traits::{CoreCache, ReadOnlyCache};

pub use snapshot::CacheSnapshot;
pub use table::Location;
use table::ItemTable;

/// Default saturation point of the visit counter (a 2-bit counter).
pub const DEFAULT_VISIT_CEILING: u8 = 3;

/// Main queue size used by [`Default`].
const DEFAULT_MAIN_CAPACITY: usize = 115;

/// Small queue size used by [`Default`] (about 10% of the total).
const DEFAULT_SMALL_CAPACITY: usize = 13;

/// Counters for S3-FIFO queue transitions.
#[cfg(feature = "metrics")]
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct S3FifoMetrics {
    /// `get` calls that returned a value.
    pub hits: u64,
    /// `get` calls on unknown keys or tombstones.
    pub misses: u64,
    /// `put` calls for unknown keys.
    pub inserts: u64,
    /// `put` calls for keys already live in Small or Main.
    pub updates: u64,
    /// Small tail items moved to Main.
    pub promotions: u64,
    /// Small tail items turned into tombstones.
    pub demotions: u64,
    /// Tombstoned keys re-admitted straight into Main.
    pub ghost_hits: u64,
    /// Main tail items given another lap by the clock sweep.
    pub main_reinserts: u64,
    /// Items dropped from Main.
    pub main_evictions: u64,
    /// Tombstones forgotten off the Ghost tail.
    pub ghost_evictions: u64,
}

#[cfg(feature = "metrics")]
impl std::fmt::Display for S3FifoMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let total_accesses = self.hits + self.misses;
        let hit_rate = if total_accesses > 0 {
            (self.hits as f64 / total_accesses as f64) * 100.0
        } else {
            0.0
        };

        write!(
            f,
            "S3FifoMetrics {{ hits: {}, misses: {}, hit_rate: {:.2}%, inserts: {}, updates: {}, \
             promotions: {}, demotions: {}, ghost_hits: {}, main_reinserts: {}, \
             main_evictions: {}, ghost_evictions: {} }}",
            self.hits,
            self.misses,
            hit_rate,
            self.inserts,
            self.updates,
            self.promotions,
            self.demotions,
            self.ghost_hits,
            self.main_reinserts,
            self.main_evictions,
            self.ghost_evictions
        )
    }
}

// ---------------------------------------------------------------------------
// S3FifoCache
// ---------------------------------------------------------------------------

/// S3-FIFO cache with explicit Small, Main and Ghost queue capacities.
///
/// Nodes live in one arena owned by the item table; the three queues are
/// index-linked through those nodes, so promotion, demotion and removal from
/// the middle of the ghost queue are all O(1).
///
/// # Type Parameters
///
/// - `K`: Key type, must be `Clone + Eq + Hash`
/// - `V`: Value type
///
/// # Example
///
/// ```
/// use s3fifo::policy::s3_fifo::S3FifoCache;
///
/// let mut cache: S3FifoCache<String, u32> = S3FifoCache::new(90, 10);
///
/// cache.put("hot".to_string(), 1);
/// cache.get(&"hot".to_string());
///
/// for i in 0..500 {
///     cache.put(format!("scan_{}", i), i);
/// }
///
/// assert!(cache.get(&"hot".to_string()).is_some());
/// ```
pub struct S3FifoCache<K, V> {
    /// Owns every tracked node, tombstones included.
    table: ItemTable<K, V>,

    /// Probationary FIFO for newly admitted keys.
    small: LinkedQueue,

    /// Protected FIFO, evicted by clock sweep.
    main: LinkedQueue,

    /// Tombstones of keys that left Small unvisited.
    ghost: LinkedQueue,

    /// Saturation point for visit counters.
    visit_ceiling: u8,

    #[cfg(feature = "metrics")]
    metrics: S3FifoMetrics,
}

impl<K, V> Default for S3FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a cache holding 128 values, 13 of them in the small queue.
    fn default() -> Self {
        Self::from_parts(
            DEFAULT_MAIN_CAPACITY,
            DEFAULT_SMALL_CAPACITY,
            DEFAULT_VISIT_CEILING,
        )
    }
}

impl<K, V> S3FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Creates a cache with the given main and small queue capacities.
    ///
    /// The ghost queue gets `small_capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if either capacity is zero. See [`try_new`](Self::try_new).
    pub fn new(main_capacity: usize, small_capacity: usize) -> Self {
        S3FifoBuilder::new(main_capacity, small_capacity).build()
    }

    /// Creates a cache, returning an error on invalid parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if either capacity is zero.
    pub fn try_new(main_capacity: usize, small_capacity: usize) -> Result<Self, ConfigError> {
        S3FifoBuilder::new(main_capacity, small_capacity).try_build()
    }

    /// Returns a builder for finer configuration.
    pub fn builder(main_capacity: usize, small_capacity: usize) -> S3FifoBuilder {
        S3FifoBuilder::new(main_capacity, small_capacity)
    }

    /// Assembles a cache from already-validated parameters.
    pub(crate) fn from_parts(
        main_capacity: usize,
        small_capacity: usize,
        visit_ceiling: u8,
    ) -> Self {
        Self {
            table: ItemTable::with_capacity(main_capacity + 2 * small_capacity),
            small: LinkedQueue::new(small_capacity),
            main: LinkedQueue::new(main_capacity),
            ghost: LinkedQueue::new(small_capacity),
            visit_ceiling,
            #[cfg(feature = "metrics")]
            metrics: S3FifoMetrics::default(),
        }
    }

    /// Number of entries holding a value (Small + Main).
    #[inline]
    pub fn len(&self) -> usize {
        self.small.len() + self.main.len()
    }

    /// Returns `true` if no entry holds a value.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of tracked keys, tombstones included.
    #[inline]
    pub fn table_len(&self) -> usize {
        self.table.len()
    }

    /// Maximum number of entries holding a value (main + small capacity).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.main.capacity() + self.small.capacity()
    }

    #[inline]
    pub fn small_len(&self) -> usize {
        self.small.len()
    }

    #[inline]
    pub fn small_capacity(&self) -> usize {
        self.small.capacity()
    }

    #[inline]
    pub fn main_len(&self) -> usize {
        self.main.len()
    }

    #[inline]
    pub fn main_capacity(&self) -> usize {
        self.main.capacity()
    }

    #[inline]
    pub fn ghost_len(&self) -> usize {
        self.ghost.len()
    }

    #[inline]
    pub fn ghost_capacity(&self) -> usize {
        self.ghost.capacity()
    }

    #[inline]
    pub fn visit_ceiling(&self) -> u8 {
        self.visit_ceiling
    }

    /// Returns performance metrics if the `metrics` feature is enabled.
    #[cfg(feature = "metrics")]
    #[inline]
    pub fn metrics(&self) -> &S3FifoMetrics {
        &self.metrics
    }

    /// Resets performance metrics to zero.
    #[cfg(feature = "metrics")]
    #[inline]
    pub fn reset_metrics(&mut self) {
        self.metrics = S3FifoMetrics::default();
    }

    /// Returns `true` if `key` is tracked anywhere, Ghost included.
    ///
    /// A tombstoned key is tracked but not retrievable; use
    /// [`get`](Self::get) or [`peek`](Self::peek) to ask for a value.
    #[inline]
    pub fn has(&self, key: &K) -> bool {
        self.table.contains(key)
    }

    /// Returns which queue holds `key`, if any.
    #[inline]
    pub fn location(&self, key: &K) -> Option<Location> {
        self.table.get(key).map(|node| node.location)
    }

    /// Returns the current visit count of `key`, if tracked.
    #[inline]
    pub fn visit_count(&self, key: &K) -> Option<u8> {
        self.table.get(key).map(|node| node.visits)
    }

    /// Retrieves a live value without recording a visit.
    #[inline]
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.table.get(key)?.value.as_ref()
    }

    /// Retrieves a live value, recording a visit.
    ///
    /// Misses on unknown keys and on tombstones; a tombstone's count is not
    /// touched.
    #[inline]
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let ceiling = self.visit_ceiling;
        let node = match self.table.get_mut(key) {
            Some(node) if node.is_live() => node,
            _ => {
                #[cfg(feature = "metrics")]
                {
                    self.metrics.misses += 1;
                }
                return None;
            },
        };

        #[cfg(feature = "metrics")]
        {
            self.metrics.hits += 1;
        }

        node.touch(ceiling);
        node.value.as_ref()
    }

    /// Retrieves a mutable reference to a live value, recording a visit.
    #[inline]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let ceiling = self.visit_ceiling;
        let node = match self.table.get_mut(key) {
            Some(node) if node.is_live() => node,
            _ => {
                #[cfg(feature = "metrics")]
                {
                    self.metrics.misses += 1;
                }
                return None;
            },
        };

        #[cfg(feature = "metrics")]
        {
            self.metrics.hits += 1;
        }

        node.touch(ceiling);
        node.value.as_mut()
    }

    /// Offers a key/value pair to the cache.
    ///
    /// - Unknown key: admitted to the Small queue.
    /// - Tombstoned key: re-admitted straight to the Main queue with `value`.
    /// - Live key: records a visit; the stored value and queue position are
    ///   left as they are.
    ///
    /// # Panics
    ///
    /// Panics if the main-queue clock sweep finds no victim, which means the
    /// queue bookkeeping is corrupt. See [`try_put`](Self::try_put).
    pub fn put(&mut self, key: K, value: V) {
        if let Err(e) = self.try_put(key, value) {
            panic!("{}", e);
        }
    }

    /// Same as [`put`](Self::put), but hands back the bookkeeping failure
    /// instead of panicking.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantError`] if the main-queue clock sweep exhausts the
    /// queue without finding an unvisited item. The cache must not be used
    /// after that.
    pub fn try_put(&mut self, key: K, value: V) -> Result<(), InvariantError> {
        let Some(id) = self.table.lookup(&key) else {
            #[cfg(feature = "metrics")]
            {
                self.metrics.inserts += 1;
            }
            let id = self.table.insert(key, value);
            return self.insert_small(id);
        };

        let ceiling = self.visit_ceiling;
        let node = self.table.node_mut(id);
        match node.location {
            Location::Ghost => {
                node.value = Some(value);
                self.ghost.unlink(self.table.arena_mut(), id);
                #[cfg(feature = "metrics")]
                {
                    self.metrics.ghost_hits += 1;
                }
                trace!(ghost_len = self.ghost.len(), "re-admitting tombstoned key to main");
                self.insert_main(id)
            },
            Location::Small | Location::Main => {
                node.touch(ceiling);
                #[cfg(feature = "metrics")]
                {
                    self.metrics.updates += 1;
                }
                Ok(())
            },
        }
    }

    /// Drops every entry, tombstones included.
    pub fn clear(&mut self) {
        debug!(
            small_len = self.small.len(),
            main_len = self.main.len(),
            ghost_len = self.ghost.len(),
            "clearing cache"
        );
        self.table.clear();
        self.small.clear();
        self.main.clear();
        self.ghost.clear();
    }

    /// Iterates live entries: Small head to tail, then Main head to tail.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        let arena = self.table.arena();
        self.small
            .iter(arena)
            .chain(self.main.iter(arena))
            .filter_map(|(_, node)| node.value.as_ref().map(|value| (&node.key, value)))
    }

    /// Copies every queue's keys and visit counts, head to tail.
    pub fn snapshot(&self) -> CacheSnapshot<K> {
        let arena = self.table.arena();
        let collect = |queue: &LinkedQueue| {
            queue
                .iter(arena)
                .map(|(_, node)| (node.key.clone(), node.visits))
                .collect::<Vec<_>>()
        };
        CacheSnapshot {
            small: collect(&self.small),
            main: collect(&self.main),
            ghost: collect(&self.ghost),
        }
    }

    // -----------------------------------------------------------------------
    // Queue admission and eviction
    // -----------------------------------------------------------------------

    fn insert_small(&mut self, id: SlotId) -> Result<(), InvariantError> {
        self.table.node_mut(id).relocate(Location::Small);
        if self.small.is_full() {
            self.evict_small()?;
        }
        self.small.push_head(self.table.arena_mut(), id);
        Ok(())
    }

    /// Moves the Small tail to Main if it was reused, otherwise to Ghost.
    fn evict_small(&mut self) -> Result<(), InvariantError> {
        let Some(id) = self.small.pop_tail(self.table.arena_mut()) else {
            return Ok(());
        };

        if self.table.node(id).visits > 0 {
            #[cfg(feature = "metrics")]
            {
                self.metrics.promotions += 1;
            }
            trace!(main_len = self.main.len(), "promoting small tail to main");
            self.insert_main(id)
        } else {
            #[cfg(feature = "metrics")]
            {
                self.metrics.demotions += 1;
            }
            trace!(ghost_len = self.ghost.len(), "demoting small tail to ghost");
            self.insert_ghost(id);
            Ok(())
        }
    }

    fn insert_main(&mut self, id: SlotId) -> Result<(), InvariantError> {
        self.table.node_mut(id).relocate(Location::Main);
        if self.main.is_full() {
            self.evict_main()?;
        }
        self.main.push_head(self.table.arena_mut(), id);
        Ok(())
    }

    /// Clock sweep: visited tail items lose one credit and go back to the
    /// head; the first unvisited tail item is dropped.
    fn evict_main(&mut self) -> Result<(), InvariantError> {
        while let Some(id) = self.main.pop_tail(self.table.arena_mut()) {
            let node = self.table.node_mut(id);
            if node.visits > 0 {
                node.visits -= 1;
                self.main.push_head(self.table.arena_mut(), id);
                #[cfg(feature = "metrics")]
                {
                    self.metrics.main_reinserts += 1;
                }
                continue;
            }

            self.table.remove(id);
            #[cfg(feature = "metrics")]
            {
                self.metrics.main_evictions += 1;
            }
            trace!(main_len = self.main.len(), "evicted main tail");
            return Ok(());
        }

        error!(
            main_capacity = self.main.capacity(),
            table_len = self.table.len(),
            "main queue clock sweep found no victim"
        );
        Err(InvariantError::new(format!(
            "main queue clock sweep exhausted without a victim (capacity {}, tracked keys {})",
            self.main.capacity(),
            self.table.len()
        )))
    }

    /// Turns a node into a tombstone, forgetting the oldest one if full.
    fn insert_ghost(&mut self, id: SlotId) {
        let node = self.table.node_mut(id);
        node.relocate(Location::Ghost);
        node.value = None;

        if self.ghost.is_full()
            && let Some(expired) = self.ghost.pop_tail(self.table.arena_mut())
        {
            self.table.remove(expired);
            #[cfg(feature = "metrics")]
            {
                self.metrics.ghost_evictions += 1;
            }
            trace!(ghost_len = self.ghost.len(), "forgot ghost tail");
        }

        self.ghost.push_head(self.table.arena_mut(), id);
    }

    /// Validates internal invariants (debug-only).
    #[cfg(debug_assertions)]
    pub fn check_invariants(&self) -> Result<(), InvariantError>
    where
        K: Debug,
    {
        let queues = [
            (Location::Small, &self.small),
            (Location::Main, &self.main),
            (Location::Ghost, &self.ghost),
        ];

        let mut total = 0;
        for (location, queue) in queues {
            if queue.len() > queue.capacity() {
                return Err(InvariantError::new(format!(
                    "{:?} queue holds {} items, capacity {}",
                    location,
                    queue.len(),
                    queue.capacity()
                )));
            }

            let mut count = 0;
            let mut prev: Option<SlotId> = None;
            for (id, node) in queue.iter(self.table.arena()) {
                count += 1;
                if node.location != location {
                    return Err(InvariantError::new(format!(
                        "node {:?} in {:?} queue is tagged {:?}",
                        node.key, location, node.location
                    )));
                }
                if node.value.is_some() != node.is_live() {
                    return Err(InvariantError::new(format!(
                        "node {:?} in {:?} queue has value present = {}",
                        node.key,
                        location,
                        node.value.is_some()
                    )));
                }
                if node.visits > self.visit_ceiling {
                    return Err(InvariantError::new(format!(
                        "node {:?} has {} visits, ceiling {}",
                        node.key, node.visits, self.visit_ceiling
                    )));
                }
                if node.links().prev != prev {
                    return Err(InvariantError::new(format!(
                        "{:?} queue: node {:?} prev link inconsistent",
                        location, node.key
                    )));
                }
                if self.table.lookup(&node.key) != Some(id) {
                    return Err(InvariantError::new(format!(
                        "{:?} queue: node {:?} not indexed at its slot",
                        location, node.key
                    )));
                }
                prev = Some(id);
            }

            if count != queue.len() {
                return Err(InvariantError::new(format!(
                    "{:?} queue: counted {} but len = {}",
                    location,
                    count,
                    queue.len()
                )));
            }
            if queue.tail() != prev {
                return Err(InvariantError::new(format!(
                    "{:?} queue: tail does not match last node",
                    location
                )));
            }
            total += count;
        }

        if self.table.len() != total {
            return Err(InvariantError::new(format!(
                "item table holds {} keys but queues hold {}",
                self.table.len(),
                total
            )));
        }

        for (key, id) in self.table.ids() {
            if !self.table.arena().contains(id) {
                return Err(InvariantError::new(format!(
                    "key {:?} points at vacant slot {:?}",
                    key, id
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Std trait implementations
// ---------------------------------------------------------------------------

impl<K, V> Extend<(K, V)> for S3FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.put(k, v);
        }
    }
}

impl<K, V> Debug for S3FifoCache<K, V>
where
    K: Clone + Eq + Hash + Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3FifoCache")
            .field("small_len", &self.small.len())
            .field("small_cap", &self.small.capacity())
            .field("main_len", &self.main.len())
            .field("main_cap", &self.main.capacity())
            .field("ghost_len", &self.ghost.len())
            .field("visit_ceiling", &self.visit_ceiling)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Cache trait implementations
// ---------------------------------------------------------------------------

impl<K, V> ReadOnlyCache<K, V> for S3FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn has(&self, key: &K) -> bool {
        S3FifoCache::has(self, key)
    }

    #[inline]
    fn len(&self) -> usize {
        S3FifoCache::len(self)
    }

    #[inline]
    fn capacity(&self) -> usize {
        S3FifoCache::capacity(self)
    }
}

impl<K, V> CoreCache<K, V> for S3FifoCache<K, V>
where
    K: Clone + Eq + Hash,
{
    #[inline]
    fn put(&mut self, key: K, value: V) {
        S3FifoCache::put(self, key, value)
    }

    #[inline]
    fn get(&mut self, key: &K) -> Option<&V> {
        S3FifoCache::get(self, key)
    }

    fn clear(&mut self) {
        S3FifoCache::clear(self);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
