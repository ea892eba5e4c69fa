//! Simple image cache
//!
//! URL-keyed bitmap map with a fixed admission cap and no eviction. Once
//! `MAX_ENTRIES` bitmaps are stored, every further `put` is dropped, even
//! for keys already present, until `clear` is called.

use std::cell::Cell;
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use crate::Bitmap;

/// Admission cap
pub const MAX_ENTRIES: usize = 20;

/// Bitmap cache keyed by request URL
#[derive(Debug, Default)]
pub struct SimpleImageCache {
    entries: HashMap<String, Bitmap>,
    hits: Cell<u64>,
    misses: Cell<u64>,
    rejected: u64,
}

impl SimpleImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cached bitmap
    pub fn get(&self, key: &str) -> Option<Bitmap> {
        match self.entries.get(key) {
            Some(bitmap) => {
                self.hits.set(self.hits.get() + 1);
                Some(Bitmap::clone(bitmap))
            }
            None => {
                self.misses.set(self.misses.get() + 1);
                None
            }
        }
    }

    /// Store a bitmap if the cache is below its cap
    pub fn put(&mut self, key: &str, bitmap: Bitmap) {
        if self.entries.len() >= MAX_ENTRIES {
            self.rejected += 1;
            tracing::trace!("image cache full, dropping {}", key);
            return;
        }
        self.entries.insert(key.to_string(), bitmap);
    }

    /// Remove every entry
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Check presence without touching the hit/miss counters
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.entries.len(),
            capacity: MAX_ENTRIES,
            hits: self.hits.get(),
            misses: self.misses.get(),
            rejected_puts: self.rejected,
            memory_bytes: self.entries.values().map(|b| b.memory_size()).sum(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub entry_count: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub rejected_puts: u64,
    pub memory_bytes: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn is_full(&self) -> bool {
        self.entry_count >= self.capacity
    }
}

static SHARED_CACHE: OnceLock<Mutex<SimpleImageCache>> = OnceLock::new();

/// Process-wide image cache
///
/// The lock covers single operations only. Callers that check, fetch and
/// then store do so without holding it across the fetch.
pub fn shared_cache() -> &'static Mutex<SimpleImageCache> {
    SHARED_CACHE.get_or_init(|| Mutex::new(SimpleImageCache::new()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DecodedImage;
    use std::sync::Arc;

    fn bitmap(shade: u8) -> Bitmap {
        Arc::new(DecodedImage::from_rgba(vec![shade; 4], 1, 1))
    }

    #[test]
    fn test_cache_put_get() {
        let mut cache = SimpleImageCache::new();
        cache.put("https://example.com/a.png", bitmap(1));

        let hit = cache.get("https://example.com/a.png").unwrap();
        assert_eq!(hit.pixels, vec![1; 4]);
        assert!(cache.get("https://example.com/b.png").is_none());

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hit_rate(), 0.5);
    }

    #[test]
    fn test_get_returns_shared_bitmap() {
        let mut cache = SimpleImageCache::new();
        let original = bitmap(7);
        cache.put("k", Arc::clone(&original));

        assert!(Arc::ptr_eq(&cache.get("k").unwrap(), &original));
    }

    #[test]
    fn test_overwrite_below_cap() {
        let mut cache = SimpleImageCache::new();
        cache.put("k", bitmap(1));
        cache.put("k", bitmap(2));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("k").unwrap().pixels, vec![2; 4]);
    }

    #[test]
    fn test_cap_drops_new_keys() {
        let mut cache = SimpleImageCache::new();
        for i in 0..MAX_ENTRIES {
            cache.put(&format!("url{}", i), bitmap(i as u8));
        }
        assert_eq!(cache.len(), MAX_ENTRIES);
        assert!(cache.stats().is_full());

        cache.put("url-extra", bitmap(99));
        assert!(cache.get("url-extra").is_none());
        assert_eq!(cache.len(), MAX_ENTRIES);
        assert_eq!(cache.stats().rejected_puts, 1);
    }

    #[test]
    fn test_cap_drops_overwrites_too() {
        let mut cache = SimpleImageCache::new();
        for i in 0..MAX_ENTRIES {
            cache.put(&format!("url{}", i), bitmap(1));
        }

        cache.put("url0", bitmap(2));
        assert_eq!(cache.get("url0").unwrap().pixels, vec![1; 4]);
    }

    #[test]
    fn test_clear_reopens_admission() {
        let mut cache = SimpleImageCache::new();
        for i in 0..MAX_ENTRIES {
            cache.put(&format!("url{}", i), bitmap(1));
        }
        cache.clear();

        assert!(cache.is_empty());
        assert!(cache.get("url0").is_none());

        cache.put("fresh", bitmap(3));
        assert!(cache.contains("fresh"));
    }

    #[test]
    fn test_stats_memory() {
        let mut cache = SimpleImageCache::new();
        cache.put("a", Arc::new(DecodedImage::from_rgba(vec![0; 16], 2, 2)));
        cache.put("b", bitmap(0));

        let stats = cache.stats();
        assert_eq!(stats.entry_count, 2);
        assert_eq!(stats.capacity, MAX_ENTRIES);
        assert_eq!(stats.memory_bytes, 20);
    }

    #[test]
    fn test_shared_cache_is_single_instance() {
        assert!(std::ptr::eq(shared_cache(), shared_cache()));
    }
}
