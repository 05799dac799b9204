//! Per-seed link deduplication

use std::collections::HashSet;

/// Remembers which link targets a single seed's traversal has already emitted
///
/// Owned by exactly one worker; it is deliberately not shared, so two seeds
/// that discover the same target each emit it once.
#[derive(Debug, Default)]
pub struct SeedDeduplicator {
    visited: HashSet<String>,
}

impl SeedDeduplicator {
    /// Creates an empty deduplicator
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true the first time `url` is seen, false on every later call
    ///
    /// The first call also records the URL.
    pub fn should_emit(&mut self, url: &str) -> bool {
        if self.visited.contains(url) {
            return false;
        }
        self.visited.insert(url.to_string())
    }

    /// Returns true if `url` has already been emitted
    pub fn contains(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Number of distinct targets emitted so far
    pub fn len(&self) -> usize {
        self.visited.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }
}
