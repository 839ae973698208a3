//! Caching for values resolved from transition names

use cached::{Cached, UnboundCache};
use parking_lot::Mutex;

/// Permanent cache keyed by transition name.
///
/// Entries are never evicted: once a name is resolved it maps to the same value until the cache
/// is cleared.
pub struct NameCache<T> {
    cache: Mutex<UnboundCache<String, T>>,
}

impl<T: Clone> NameCache<T> {
    pub fn new() -> Self {
        Self {
            cache: Mutex::new(UnboundCache::new()),
        }
    }

    pub fn cache_get(&self, name: &str) -> Option<T> {
        self.cache.lock().cache_get(name).cloned()
    }

    pub fn cache_set(&self, name: String, value: T) -> T {
        self.cache.lock().cache_set(name, value.clone());
        value
    }

    /// Return the cached value for `name` or resolve and store it.
    ///
    /// Failed resolutions are not cached. The lock is not held while resolving.
    pub fn get_or_try_insert_with<E>(
        &self,
        name: &str,
        resolve: impl FnOnce() -> Result<T, E>,
    ) -> Result<T, E> {
        if let Some(value) = self.cache_get(name) {
            return Ok(value);
        }
        let value = resolve()?;
        Ok(self.cache_set(name.to_string(), value))
    }

    pub fn len(&self) -> usize {
        self.cache.lock().cache_size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of lookups answered from the cache.
    pub fn hits(&self) -> u64 {
        self.cache.lock().cache_hits().unwrap_or(0)
    }

    pub fn clear(&self) {
        self.cache.lock().cache_clear();
    }
}

impl<T: Clone> Default for NameCache<T> {
    fn default() -> Self {
        Self::new()
    }
}
