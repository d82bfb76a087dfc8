//! Cache Entry Module
//!
//! Wraps a cached item with its write time and absolute expiration.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::cache::Item;

// == Cache Entry ==
/// A stored item together with its expiration metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached banner
    pub item: Item,
    /// When the entry was written
    pub created_at: DateTime<Utc>,
    /// Point after which the entry is stale
    pub expires_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry written at `now` that lives for `ttl`.
    ///
    /// A TTL too large to represent saturates to the maximum timestamp.
    pub fn new(item: Item, ttl: Duration, now: DateTime<Utc>) -> Self {
        let expires_at = TimeDelta::from_std(ttl)
            .ok()
            .and_then(|delta| now.checked_add_signed(delta))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            item,
            created_at: now,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry is stale at `now`.
    ///
    /// Strictly after: an entry whose expiration equals `now` is still live.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}
