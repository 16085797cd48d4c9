//! Point-in-time copy of the three queues, for inspection and tracing.

use std::fmt;

/// Keys and visit counts of every queue, each listed head (newest) to tail
/// (next eviction candidate).
///
/// # Example
///
/// ```
/// use s3fifo::policy::s3_fifo::S3FifoCache;
///
/// let mut cache = S3FifoCache::new(4, 1);
/// cache.put("a", 1);
/// cache.put("b", 2); // "a" is pushed out of Small into Ghost
///
/// let snap = cache.snapshot();
/// assert_eq!(snap.small, vec![("b", 0)]);
/// assert_eq!(snap.ghost, vec![("a", 0)]);
/// assert!(snap.main.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSnapshot<K> {
    pub small: Vec<(K, u8)>,
    pub main: Vec<(K, u8)>,
    pub ghost: Vec<(K, u8)>,
}

impl<K> CacheSnapshot<K> {
    /// Total tracked keys across the three queues.
    pub fn len(&self) -> usize {
        self.small.len() + self.main.len() + self.ghost.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn write_queue<K: fmt::Debug>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    entries: &[(K, u8)],
) -> fmt::Result {
    write!(f, "{:<6}[", name)?;
    for (i, (key, visits)) in entries.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{:?}({})", key, visits)?;
    }
    f.write_str("]")
}

/// Renders one line per queue, e.g. `main: [5(0), 4(0), 1(3)]`.
impl<K: fmt::Debug> fmt::Display for CacheSnapshot<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_queue(f, "main:", &self.main)?;
        f.write_str("\n")?;
        write_queue(f, "small:", &self.small)?;
        f.write_str("\n")?;
        write_queue(f, "ghost:", &self.ghost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_queues_head_to_tail() {
        let snap = CacheSnapshot {
            small: vec![(7, 0), (6, 0)],
            main: vec![(5, 0), (4, 0), (1, 3)],
            ghost: vec![(3, 0)],
        };
        assert_eq!(
            snap.to_string(),
            "main: [5(0), 4(0), 1(3)]\nsmall:[7(0), 6(0)]\nghost:[3(0)]"
        );
        assert_eq!(snap.len(), 6);
    }

    #[test]
    fn empty_snapshot_renders_empty_brackets() {
        let snap: CacheSnapshot<u8> = CacheSnapshot {
            small: vec![],
            main: vec![],
            ghost: vec![],
        };
        assert!(snap.is_empty());
        assert!(snap.to_string().ends_with("ghost:[]"));
    }
}
