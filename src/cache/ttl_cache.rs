//! TTL Cache Facade
//!
//! The shared, cloneable handle request handlers and the sweeper use to
//! reach the item store.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::cache::{CacheHit, CacheKey, CacheStats, Item, ItemStore, StatsSnapshot};

// == TTL Cache ==
/// Item store behind a single readers-writer lock, plus counters.
///
/// Cloning is cheap and every clone sees the same store.
#[derive(Debug, Clone)]
pub struct TtlCache {
    store: Arc<RwLock<ItemStore>>,
    stats: Arc<CacheStats>,
}

impl TtlCache {
    /// Creates an empty cache whose entries live for `default_expiration`.
    pub fn new(default_expiration: Duration) -> Self {
        Self {
            store: Arc::new(RwLock::new(ItemStore::new(default_expiration))),
            stats: Arc::new(CacheStats::new()),
        }
    }

    // == Add One ==
    /// Caches `item`, replacing whatever was stored under the same key.
    pub async fn add_one(&self, item: Item) {
        let mut store = self.store.write().await;
        store.upsert(item, Utc::now());
    }

    // == Get ==
    /// Returns the live content and access flag for `(feature_id, tag_id)`.
    ///
    /// Expired entries are misses even before the sweeper reclaims them.
    pub async fn get(&self, feature_id: i32, tag_id: i32) -> Option<CacheHit> {
        let hit = {
            let store = self.store.read().await;
            store
                .lookup(feature_id, tag_id, Utc::now())
                .map(|item| CacheHit {
                    content: item.content.clone(),
                    is_active: item.is_active,
                })
        };

        match hit {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        hit
    }

    // == Invalidate ==
    /// Drops every cached entry of `banner_id`. Returns how many were dropped.
    pub async fn invalidate(&self, banner_id: i32) -> usize {
        let mut store = self.store.write().await;
        store.remove_banner(banner_id)
    }

    // == Sweep Expired ==
    /// Reclaims entries expired at `now`.
    ///
    /// The scan runs under the read lock; the write lock is taken only when
    /// there is something to delete.
    pub async fn sweep_expired(&self, now: DateTime<Utc>) -> usize {
        let expired = {
            let store = self.store.read().await;
            store.snapshot_expired(now)
        };

        let removed = if expired.is_empty() {
            0
        } else {
            let mut store = self.store.write().await;
            store.remove_expired(&expired, now)
        };

        self.stats.record_sweep(removed);
        removed
    }

    // == Stats ==
    pub async fn stats(&self) -> StatsSnapshot {
        let total_entries = self.store.read().await.len();
        self.stats.snapshot(total_entries)
    }

    /// Number of physically stored entries, including expired ones.
    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.store.read().await.is_empty()
    }

    /// Returns true if an entry is physically stored under `key`.
    pub async fn contains(&self, key: &CacheKey) -> bool {
        self.store.read().await.contains(key)
    }
}
