//! Bounded FIFO threaded through [`SlotArena`] nodes.
//!
//! The queue itself stores only `head`, `tail` and a length; the `prev` /
//! `next` links live inside the arena nodes (anything implementing
//! [`Linked`]). Several queues can therefore share one arena, and moving a
//! node from one queue to another is an unlink plus a push with no copy of
//! the node.
//!
//! ## Architecture
//!
//! ```text
//!   head (newest)                                   tail (oldest)
//!     │                                                  │
//!     ▼                                                  ▼
//!   ┌─────┐ next ┌─────┐ next ┌─────┐ next ┌─────┐
//!   │ id3 │ ───► │ id7 │ ───► │ id1 │ ───► │ id4 │ ───► None
//!   │     │ ◄─── │     │ ◄─── │     │ ◄─── │     │
//!   └─────┘ prev └─────┘ prev └─────┘ prev └─────┘
//! ```
//!
//! ## Operations
//!
//! | Operation    | Cost | Notes                                  |
//! |--------------|------|----------------------------------------|
//! | `push_head`  | O(1) | does not enforce `capacity`            |
//! | `pop_tail`   | O(1) | oldest node first                      |
//! | `unlink`     | O(1) | arbitrary position, via back links     |
//! | `iter`       | O(n) | head → tail                            |
//!
//! Capacity is advisory: callers check [`LinkedQueue::is_full`] and evict
//! before pushing.

use crate::ds::slot_arena::{SlotArena, SlotId};

/// Intrusive link pair stored inside each arena node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Links {
    pub prev: Option<SlotId>,
    pub next: Option<SlotId>,
}

/// Arena nodes that can be threaded onto a [`LinkedQueue`].
pub trait Linked {
    fn links(&self) -> &Links;
    fn links_mut(&mut self) -> &mut Links;
}

#[inline]
fn links_of<T: Linked>(arena: &SlotArena<T>, id: SlotId) -> Links {
    *arena.get(id).expect("linked queue: stale SlotId").links()
}

#[inline]
fn links_mut_of<T: Linked>(arena: &mut SlotArena<T>, id: SlotId) -> &mut Links {
    arena
        .get_mut(id)
        .expect("linked queue: stale SlotId")
        .links_mut()
}

/// FIFO of arena handles: head = most recently pushed, tail = next to pop.
#[derive(Debug, Clone)]
pub struct LinkedQueue {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
    capacity: usize,
}

impl LinkedQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            capacity,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// `true` when the next push must be preceded by an eviction.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len >= self.capacity
    }

    #[inline]
    pub fn head(&self) -> Option<SlotId> {
        self.head
    }

    #[inline]
    pub fn tail(&self) -> Option<SlotId> {
        self.tail
    }

    /// Links `id` in front of the current head.
    ///
    /// The node must not be on any queue.
    pub fn push_head<T: Linked>(&mut self, arena: &mut SlotArena<T>, id: SlotId) {
        *links_mut_of(arena, id) = Links {
            prev: None,
            next: self.head,
        };

        match self.head {
            Some(old_head) => links_mut_of(arena, old_head).prev = Some(id),
            None => self.tail = Some(id),
        }

        self.head = Some(id);
        self.len += 1;
    }

    /// Detaches and returns the oldest node.
    pub fn pop_tail<T: Linked>(&mut self, arena: &mut SlotArena<T>) -> Option<SlotId> {
        let id = self.tail?;
        self.unlink(arena, id);
        Some(id)
    }

    /// Detaches `id` from wherever it sits in this queue.
    ///
    /// The node must currently be on this queue.
    pub fn unlink<T: Linked>(&mut self, arena: &mut SlotArena<T>, id: SlotId) {
        let Links { prev, next } = links_of(arena, id);

        match prev {
            Some(p) => links_mut_of(arena, p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => links_mut_of(arena, n).prev = prev,
            None => self.tail = prev,
        }

        *links_mut_of(arena, id) = Links::default();
        self.len -= 1;
    }

    /// Forgets all handles. The arena is left untouched.
    pub fn clear(&mut self) {
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Walks the queue from head to tail.
    pub fn iter<'a, T: Linked>(&self, arena: &'a SlotArena<T>) -> QueueIter<'a, T> {
        QueueIter {
            arena,
            current: self.head,
            remaining: self.len,
        }
    }
}

/// Head-to-tail iterator over a [`LinkedQueue`].
pub struct QueueIter<'a, T> {
    arena: &'a SlotArena<T>,
    current: Option<SlotId>,
    remaining: usize,
}

impl<'a, T: Linked> Iterator for QueueIter<'a, T> {
    type Item = (SlotId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let node = self.arena.get(id)?;
        self.current = node.links().next;
        self.remaining = self.remaining.saturating_sub(1);
        Some((id, node))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T: Linked> ExactSizeIterator for QueueIter<'_, T> {}

impl<T: Linked> std::iter::FusedIterator for QueueIter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Item {
        links: Links,
        tag: char,
    }

    impl Linked for Item {
        fn links(&self) -> &Links {
            &self.links
        }
        fn links_mut(&mut self) -> &mut Links {
            &mut self.links
        }
    }

    fn item(tag: char) -> Item {
        Item {
            links: Links::default(),
            tag,
        }
    }

    fn tags(queue: &LinkedQueue, arena: &SlotArena<Item>) -> Vec<char> {
        queue.iter(arena).map(|(_, item)| item.tag).collect()
    }

    #[test]
    fn push_head_pop_tail_is_fifo() {
        let mut arena = SlotArena::new();
        let mut queue = LinkedQueue::new(3);
        for tag in ['a', 'b', 'c'] {
            let id = arena.insert(item(tag));
            queue.push_head(&mut arena, id);
        }
        assert!(queue.is_full());
        assert_eq!(tags(&queue, &arena), vec!['c', 'b', 'a']);

        let popped = queue.pop_tail(&mut arena).unwrap();
        assert_eq!(arena.get(popped).unwrap().tag, 'a');
        assert_eq!(arena.get(popped).unwrap().links, Links::default());
        assert_eq!(queue.len(), 2);
        assert!(!queue.is_full());
    }

    #[test]
    fn unlink_middle_keeps_order() {
        let mut arena = SlotArena::new();
        let mut queue = LinkedQueue::new(8);
        let ids: Vec<_> = ['a', 'b', 'c', 'd']
            .into_iter()
            .map(|tag| {
                let id = arena.insert(item(tag));
                queue.push_head(&mut arena, id);
                id
            })
            .collect();

        queue.unlink(&mut arena, ids[1]);
        assert_eq!(tags(&queue, &arena), vec!['d', 'c', 'a']);

        queue.unlink(&mut arena, ids[3]);
        assert_eq!(tags(&queue, &arena), vec!['c', 'a']);
        assert_eq!(queue.head(), Some(ids[2]));

        queue.unlink(&mut arena, ids[0]);
        assert_eq!(queue.tail(), Some(ids[2]));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn node_moves_between_queues_sharing_an_arena() {
        let mut arena = SlotArena::new();
        let mut left = LinkedQueue::new(2);
        let mut right = LinkedQueue::new(2);

        let a = arena.insert(item('a'));
        let b = arena.insert(item('b'));
        left.push_head(&mut arena, a);
        left.push_head(&mut arena, b);

        let moved = left.pop_tail(&mut arena).unwrap();
        right.push_head(&mut arena, moved);

        assert_eq!(tags(&left, &arena), vec!['b']);
        assert_eq!(tags(&right, &arena), vec!['a']);
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn pop_from_empty_is_none() {
        let mut arena: SlotArena<Item> = SlotArena::new();
        let mut queue = LinkedQueue::new(1);
        assert!(queue.pop_tail(&mut arena).is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn zero_capacity_is_always_full() {
        let queue = LinkedQueue::new(0);
        assert!(queue.is_full());
    }
}
