//! Configuration for [`S3FifoCache`].
//!
//! Queue sizes are fixed at construction. The ghost queue always gets the
//! same capacity as the small queue.
//!
//! ## Example
//!
//! ```rust
//! use s3fifo::builder::S3FifoBuilder;
//!
//! let mut cache = S3FifoBuilder::new(90, 10)
//!     .visit_ceiling(7)
//!     .build::<u64, String>();
//!
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(&1), Some(&"hello".to_string()));
//! assert_eq!(cache.capacity(), 100);
//! ```

use std::hash::Hash;

use crate::error::ConfigError;
use crate::policy::s3_fifo::{DEFAULT_VISIT_CEILING, S3FifoCache};

/// Builder for [`S3FifoCache`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct S3FifoBuilder {
    main_capacity: usize,
    small_capacity: usize,
    visit_ceiling: u8,
}

impl S3FifoBuilder {
    /// Starts a configuration with the given queue sizes and the default
    /// visit ceiling.
    pub fn new(main_capacity: usize, small_capacity: usize) -> Self {
        Self {
            main_capacity,
            small_capacity,
            visit_ceiling: DEFAULT_VISIT_CEILING,
        }
    }

    /// Sets the main queue capacity.
    pub fn main_capacity(mut self, capacity: usize) -> Self {
        self.main_capacity = capacity;
        self
    }

    /// Sets the small queue capacity (and with it the ghost queue capacity).
    pub fn small_capacity(mut self, capacity: usize) -> Self {
        self.small_capacity = capacity;
        self
    }

    /// Sets the value at which an item's visit counter stops growing.
    ///
    /// A Main item with `n` visits survives `n` clock sweeps, so the ceiling
    /// bounds how long a burst of hits can protect an item.
    pub fn visit_ceiling(mut self, ceiling: u8) -> Self {
        self.visit_ceiling = ceiling;
        self
    }

    /// Checks the configuration without building anything.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if either queue capacity or the visit ceiling
    /// is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.main_capacity == 0 {
            return Err(ConfigError::new("main capacity must be greater than zero"));
        }
        if self.small_capacity == 0 {
            return Err(ConfigError::new("small capacity must be greater than zero"));
        }
        if self.visit_ceiling == 0 {
            return Err(ConfigError::new("visit ceiling must be greater than zero"));
        }
        Ok(())
    }

    /// Builds the cache.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid. See [`try_build`](Self::try_build).
    pub fn build<K, V>(self) -> S3FifoCache<K, V>
    where
        K: Clone + Eq + Hash,
    {
        match self.try_build() {
            Ok(cache) => cache,
            Err(e) => panic!("{}", e),
        }
    }

    /// Builds the cache, returning an error on invalid parameters instead of
    /// panicking.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if [`validate`](Self::validate) fails.
    ///
    /// # Example
    ///
    /// ```
    /// use s3fifo::builder::S3FifoBuilder;
    ///
    /// assert!(S3FifoBuilder::new(10, 2).try_build::<u32, u32>().is_ok());
    /// assert!(S3FifoBuilder::new(10, 0).try_build::<u32, u32>().is_err());
    /// ```
    pub fn try_build<K, V>(self) -> Result<S3FifoCache<K, V>, ConfigError>
    where
        K: Clone + Eq + Hash,
    {
        self.validate()?;
        Ok(S3FifoCache::from_parts(
            self.main_capacity,
            self.small_capacity,
            self.visit_ceiling,
        ))
    }
}
