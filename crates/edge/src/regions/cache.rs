//! In-memory region map cache with TTL
//!
//! Caches the country-code-to-region index so the commerce backend is asked
//! for it at most once per TTL window.

use std::sync::Arc;
use std::time::{Duration, Instant};

use storefront_shared::{RegionError, RegionMap};
use tokio::sync::RwLock;

use super::RegionClient;

/// Default cache TTL (1 hour)
const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Cache entry with its refresh instant
struct CacheEntry {
    map: Arc<RegionMap>,
    fetched_at: Instant,
}

impl CacheEntry {
    /// An entry is fresh while it is within the TTL and non-empty; an empty
    /// map always triggers a refetch.
    fn is_fresh(&self, ttl: Duration) -> bool {
        !self.map.is_empty() && self.fetched_at.elapsed() <= ttl
    }
}

/// Thread-safe region map cache.
///
/// The map is replaced wholesale: a refresh builds the new index off to the
/// side and swaps it in only on full success, so readers never observe a
/// partially rebuilt map and a failed refresh leaves the previous entry
/// untouched. The lock is not held across the fetch, so concurrent requests
/// hitting a stale cache may refresh in parallel; the last finisher wins the
/// swap and every finisher returns a consistent snapshot.
pub struct RegionCache {
    entry: RwLock<Option<CacheEntry>>,
    ttl: Duration,
}

impl Default for RegionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionCache {
    /// Create a new cache with the default TTL
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_CACHE_TTL)
    }

    /// Create a new cache with a custom TTL
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entry: RwLock::new(None),
            ttl,
        }
    }

    /// Return the cached map, refreshing it from the backend if it is missing,
    /// empty, or older than the TTL.
    pub async fn get_or_refresh(
        &self,
        client: &RegionClient,
    ) -> Result<Arc<RegionMap>, RegionError> {
        {
            let entry = self.entry.read().await;
            if let Some(e) = entry.as_ref() {
                if e.is_fresh(self.ttl) {
                    tracing::debug!(countries = e.map.len(), "Region cache hit");
                    return Ok(Arc::clone(&e.map));
                }
            }
        }

        let map = Arc::new(client.fetch_region_map().await?);
        tracing::info!(countries = map.len(), "Region map refreshed");

        let mut entry = self.entry.write().await;
        *entry = Some(CacheEntry {
            map: Arc::clone(&map),
            fetched_at: Instant::now(),
        });
        Ok(map)
    }

    /// Get cache statistics (for health reporting)
    pub async fn stats(&self) -> CacheStats {
        let entry = self.entry.read().await;
        match entry.as_ref() {
            Some(e) => CacheStats {
                countries: e.map.len(),
                fresh: e.is_fresh(self.ttl),
            },
            None => CacheStats::default(),
        }
    }
}

/// Cache statistics
#[derive(Default, Debug)]
pub struct CacheStats {
    pub countries: usize,
    pub fresh: bool,
}
