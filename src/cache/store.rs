//! Item Store Module
//!
//! Keyed storage of cached banners with absolute-expiration checks.
//! The store itself is not synchronized; `TtlCache` wraps it in a single
//! readers-writer lock.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::cache::{CacheEntry, CacheKey, Item};

// == Item Store ==
/// Live set of cached items, ordered by `(feature_id, banner_id)`.
#[derive(Debug)]
pub struct ItemStore {
    /// Entries keyed by feature, then banner
    entries: BTreeMap<CacheKey, CacheEntry>,
    /// Lifetime given to every entry at write time
    default_expiration: Duration,
}

impl ItemStore {
    // == Constructor ==
    /// Creates an empty store whose entries live for `default_expiration`.
    pub fn new(default_expiration: Duration) -> Self {
        Self {
            entries: BTreeMap::new(),
            default_expiration,
        }
    }

    // == Upsert ==
    /// Inserts or fully replaces the item under its key.
    ///
    /// Expiration is always `now + default_expiration`; nothing from a
    /// previous entry under the same key survives.
    pub fn upsert(&mut self, item: Item, now: DateTime<Utc>) {
        let key = item.key();
        let entry = CacheEntry::new(item, self.default_expiration, now);
        self.entries.insert(key, entry);
    }

    // == Lookup ==
    /// Finds the item answering for `(feature_id, tag_id)`.
    ///
    /// Only the given feature's key range is scanned, so the first match is
    /// the one with the lowest banner id. A first match that is already
    /// expired at `now` is a miss, even though it is still stored.
    pub fn lookup(&self, feature_id: i32, tag_id: i32, now: DateTime<Utc>) -> Option<&Item> {
        let (lo, hi) = CacheKey::feature_bounds(feature_id);
        let entry = self
            .entries
            .range(lo..=hi)
            .map(|(_, entry)| entry)
            .find(|entry| entry.item.matches(feature_id, tag_id))?;

        if entry.is_expired_at(now) {
            return None;
        }
        Some(&entry.item)
    }

    // == Remove ==
    /// Deletes the given keys. Absent keys are ignored.
    ///
    /// Returns the number of entries actually removed.
    pub fn remove(&mut self, keys: &BTreeSet<CacheKey>) -> usize {
        keys.iter()
            .filter(|key| self.entries.remove(*key).is_some())
            .count()
    }

    // == Snapshot Expired ==
    /// Returns every key whose entry is expired at `now`.
    pub fn snapshot_expired(&self, now: DateTime<Utc>) -> BTreeSet<CacheKey> {
        self.entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| *key)
            .collect()
    }

    // == Remove Expired ==
    /// Deletes the given keys whose entries are still expired at `now`.
    ///
    /// Keys rewritten after the snapshot was taken carry a fresh expiration
    /// and are kept.
    pub fn remove_expired(&mut self, keys: &BTreeSet<CacheKey>, now: DateTime<Utc>) -> usize {
        let mut removed = 0;
        for key in keys {
            if self
                .entries
                .get(key)
                .is_some_and(|entry| entry.is_expired_at(now))
            {
                self.entries.remove(key);
                removed += 1;
            }
        }
        removed
    }

    // == Remove Banner ==
    /// Deletes every entry cached for `banner_id`, whatever its feature.
    pub fn remove_banner(&mut self, banner_id: i32) -> usize {
        let keys: BTreeSet<CacheKey> = self
            .entries
            .keys()
            .filter(|key| key.banner_id == banner_id)
            .copied()
            .collect();
        self.remove(&keys)
    }

    /// Returns the stored entry for `key`, expired or not.
    pub fn get(&self, key: &CacheKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of physically stored entries, including expired ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
