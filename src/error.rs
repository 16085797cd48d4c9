//! Error types for the s3fifo library.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when construction parameters are invalid
//!   (zero queue capacity, zero visit ceiling).
//! - [`InvariantError`]: Returned when queue bookkeeping breaks its contract,
//!   either from the main-queue clock sweep or from the debug-only
//!   `check_invariants` walk.
//!
//! A lookup miss is never an error: `get` returns `None`.
//!
//! ## Example Usage
//!
//! ```
//! use s3fifo::error::ConfigError;
//! use s3fifo::policy::s3_fifo::S3FifoCache;
//!
//! let cache: Result<S3FifoCache<u64, String>, ConfigError> = S3FifoCache::try_new(10, 2);
//! assert!(cache.is_ok());
//!
//! let bad = S3FifoCache::<u64, String>::try_new(10, 0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`S3FifoCache::try_new`](crate::policy::s3_fifo::S3FifoCache::try_new)
/// and [`S3FifoBuilder::try_build`](crate::builder::S3FifoBuilder::try_build).
///
/// # Example
///
/// ```
/// use s3fifo::policy::s3_fifo::S3FifoCache;
///
/// let err = S3FifoCache::<u64, u64>::try_new(0, 2).unwrap_err();
/// assert!(err.to_string().contains("main capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when the cache's internal bookkeeping is inconsistent.
///
/// This is a contract breach, not a recoverable condition.
/// [`S3FifoCache::put`](crate::policy::s3_fifo::S3FifoCache::put) panics with
/// the message; [`try_put`](crate::policy::s3_fifo::S3FifoCache::try_put)
/// hands it back so a harness can report it before aborting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("small capacity must be greater than zero");
        assert_eq!(err.to_string(), "small capacity must be greater than zero");
        assert_eq!(err.message(), "small capacity must be greater than zero");
    }

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("main sweep found no victim");
        assert_eq!(err.to_string(), "main sweep found no victim");
        assert!(format!("{:?}", err).contains("no victim"));
    }

    #[test]
    fn errors_clone_and_compare() {
        let a = InvariantError::new("x");
        assert_eq!(a.clone(), a);
        let b = ConfigError::new("y");
        assert_eq!(b.clone(), b);
    }

    #[test]
    fn errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ConfigError>();
        assert_error::<InvariantError>();
    }
}
