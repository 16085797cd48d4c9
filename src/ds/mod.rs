pub mod linked_queue;
pub mod slot_arena;

pub use linked_queue::{Linked, LinkedQueue, Links, QueueIter};
pub use slot_arena::{SlotArena, SlotId};
