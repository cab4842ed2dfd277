//! Parsed source cache.
//!
//! ```text
//! SourceCache<S>
//! └── FxHashMap<path, S>
//!     ├── insert: first successful parse of a path
//!     └── evict:  override / add_script / write_file on that path
//! ```
//!
//! Entries never expire on their own. Any operation that changes what a path
//! resolves to must evict it.

use rustc_hash::FxHashMap;

/// Path-keyed cache of parsed sources.
#[derive(Debug, Clone)]
pub struct SourceCache<S> {
    sources: FxHashMap<String, S>,
}

impl<S> Default for SourceCache<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> SourceCache<S> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            sources: FxHashMap::default(),
        }
    }

    /// Look up a cached source.
    pub fn get(&self, path: &str) -> Option<&S> {
        self.sources.get(path)
    }

    /// Cache a parsed source.
    pub fn insert(&mut self, path: impl Into<String>, source: S) {
        self.sources.insert(path.into(), source);
    }

    /// Drop the cached source for `path`. Returns whether one was present.
    pub fn evict(&mut self, path: &str) -> bool {
        let evicted = self.sources.remove(path).is_some();
        if evicted {
            tracing::debug!(path, "evicted cached source");
        }
        evicted
    }

    /// Drop every cached source.
    pub fn clear(&mut self) {
        self.sources.clear();
    }

    /// Check if `path` has a cached source.
    pub fn contains(&self, path: &str) -> bool {
        self.sources.contains_key(path)
    }

    /// Get the number of cached sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
