//! s3fifo: the S3-FIFO cache replacement policy.
//!
//! A fixed-capacity key/value cache built from three FIFO queues (small,
//! main, ghost) and a per-item visit counter. See [`policy::s3_fifo`] for
//! the admission, promotion and eviction rules.

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;
pub mod prelude;
pub mod traits;
