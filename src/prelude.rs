pub use crate::builder::S3FifoBuilder;
pub use crate::ds::{Linked, LinkedQueue, Links, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::policy::s3_fifo::S3FifoMetrics;
pub use crate::policy::s3_fifo::{CacheSnapshot, Location, S3FifoCache};
pub use crate::traits::{CoreCache, ReadOnlyCache};
