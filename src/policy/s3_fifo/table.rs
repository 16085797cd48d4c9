//! Item table: key → node mapping over a shared [`SlotArena`].
//!
//! The table owns every node, live or tombstone. The Small, Main and Ghost
//! queues only hold [`SlotId`] handles into the arena, so moving an item
//! between queues never copies it.

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::{Linked, Links, SlotArena, SlotId};

/// Which queue currently owns an item.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Location {
    /// Probationary queue for newly admitted keys.
    Small,
    /// Protected queue for keys that showed reuse.
    Main,
    /// Tombstone queue: key only, no value.
    Ghost,
}

/// One tracked key. `value` is `None` exactly when `location == Ghost`.
pub(crate) struct Node<K, V> {
    links: Links,
    pub(crate) key: K,
    pub(crate) value: Option<V>,
    pub(crate) visits: u8,
    pub(crate) location: Location,
}

impl<K, V> Node<K, V> {
    /// Records a reuse, saturating at `ceiling`.
    #[inline]
    pub(crate) fn touch(&mut self, ceiling: u8) {
        if self.visits < ceiling {
            self.visits += 1;
        }
    }

    /// Hands the node to another queue. Visit credit does not carry over.
    #[inline]
    pub(crate) fn relocate(&mut self, location: Location) {
        self.location = location;
        self.visits = 0;
    }

    #[inline]
    pub(crate) fn is_live(&self) -> bool {
        self.location != Location::Ghost
    }
}

impl<K, V> Linked for Node<K, V> {
    #[inline]
    fn links(&self) -> &Links {
        &self.links
    }

    #[inline]
    fn links_mut(&mut self) -> &mut Links {
        &mut self.links
    }
}

pub(crate) struct ItemTable<K, V> {
    index: FxHashMap<K, SlotId>,
    arena: SlotArena<Node<K, V>>,
}

impl<K, V> ItemTable<K, V>
where
    K: Clone + Eq + Hash,
{
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            arena: SlotArena::with_capacity(capacity),
        }
    }

    /// Number of tracked keys, tombstones included.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub(crate) fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    #[inline]
    pub(crate) fn lookup(&self, key: &K) -> Option<SlotId> {
        self.index.get(key).copied()
    }

    #[inline]
    pub(crate) fn get(&self, key: &K) -> Option<&Node<K, V>> {
        let id = self.lookup(key)?;
        self.arena.get(id)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, key: &K) -> Option<&mut Node<K, V>> {
        let id = self.lookup(key)?;
        self.arena.get_mut(id)
    }

    #[inline]
    pub(crate) fn node(&self, id: SlotId) -> &Node<K, V> {
        self.arena.get(id).expect("item table: index/arena out of sync")
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, id: SlotId) -> &mut Node<K, V> {
        self.arena
            .get_mut(id)
            .expect("item table: index/arena out of sync")
    }

    /// Tracks a brand-new key. The node is on no queue until the caller
    /// pushes it onto one.
    pub(crate) fn insert(&mut self, key: K, value: V) -> SlotId {
        debug_assert!(!self.index.contains_key(&key));
        let id = self.arena.insert(Node {
            links: Links::default(),
            key: key.clone(),
            value: Some(value),
            visits: 0,
            location: Location::Small,
        });
        self.index.insert(key, id);
        id
    }

    /// Forgets a node entirely. The node must already be off its queue.
    pub(crate) fn remove(&mut self, id: SlotId) -> Node<K, V> {
        let node = self
            .arena
            .remove(id)
            .expect("item table: index/arena out of sync");
        self.index.remove(&node.key);
        node
    }

    #[inline]
    pub(crate) fn arena(&self) -> &SlotArena<Node<K, V>> {
        &self.arena
    }

    #[inline]
    pub(crate) fn arena_mut(&mut self) -> &mut SlotArena<Node<K, V>> {
        &mut self.arena
    }

    pub(crate) fn ids(&self) -> impl Iterator<Item = (&K, SlotId)> + '_ {
        self.index.iter().map(|(k, &id)| (k, id))
    }

    pub(crate) fn clear(&mut self) {
        self.index.clear();
        self.arena.clear();
    }
}
