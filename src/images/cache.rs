//! LRU cache for decoded covers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use image::DynamicImage;

/// Maximum number of covers to keep
const MAX_CACHE_SIZE: usize = 50;

#[derive(Clone)]
struct CachedCover {
    image: Arc<DynamicImage>,
    last_access: Instant,
}

/// Thread-safe cover cache keyed by URL
#[derive(Clone, Default)]
pub struct CoverCache {
    covers: Arc<Mutex<HashMap<String, CachedCover>>>,
}

impl CoverCache {
    /// Create an empty cache
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CachedCover>> {
        self.covers.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store a decoded cover, evicting the least recently used one when full
    pub fn insert(&self, url: &str, image: DynamicImage) {
        let mut cache = self.lock();

        if cache.len() >= MAX_CACHE_SIZE && !cache.contains_key(url) {
            let oldest = cache
                .iter()
                .min_by_key(|(_, v)| v.last_access)
                .map(|(k, _)| k.clone());
            if let Some(key) = oldest {
                cache.remove(&key);
            }
        }

        cache.insert(
            url.to_string(),
            CachedCover {
                image: Arc::new(image),
                last_access: Instant::now(),
            },
        );
    }

    /// Get a cover, marking it as recently used
    pub fn get(&self, url: &str) -> Option<Arc<DynamicImage>> {
        let mut cache = self.lock();
        cache.get_mut(url).map(|entry| {
            entry.last_access = Instant::now();
            Arc::clone(&entry.image)
        })
    }

    /// Whether `url` is cached
    pub fn contains(&self, url: &str) -> bool {
        self.lock().contains_key(url)
    }

    /// Number of cached covers
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cache is empty
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
