use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Thread-safe bounded cache with a fixed time-to-live per entry.
///
/// Keys are the raw source text (job descriptions, embedding inputs).
/// Eviction at capacity removes the earliest-inserted entry: reads go
/// through `peek`, so recency never reorders the eviction queue. Expired
/// entries are evicted lazily on read.
#[derive(Clone)]
pub struct TtlCache<V> {
    entries: Arc<Mutex<LruCache<String, (Instant, V)>>>,
    ttl: Duration,
}

impl<V: Clone> TtlCache<V> {
    /// # Panics
    /// Panics if `max_entries` is 0.
    pub fn new(max_entries: usize, ttl: Duration) -> Self {
        let entries =
            LruCache::new(NonZeroUsize::new(max_entries).expect("Capacity must be non-zero"));
        Self {
            entries: Arc::new(Mutex::new(entries)),
            ttl,
        }
    }

    /// Returns the cached value if present and not expired. An expired entry
    /// is removed before returning `None`.
    pub fn get(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock().unwrap();

        let expired = match entries.peek(key) {
            Some((deadline, value)) => {
                if Instant::now() < *deadline {
                    return Some(value.clone());
                }
                true
            }
            None => false,
        };

        if expired {
            entries.pop(key);
        }
        None
    }

    /// Inserts with the cache-wide TTL, evicting the earliest-inserted entry
    /// if at capacity.
    pub fn insert(&self, key: String, value: V) {
        let mut entries = self.entries.lock().unwrap();
        entries.push(key, (Instant::now() + self.ttl, value));
    }

    pub fn remove(&self, key: &str) -> Option<V> {
        let mut entries = self.entries.lock().unwrap();
        entries.pop(key).map(|(_, value)| value)
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
