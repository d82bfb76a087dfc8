//! Cache Item Module
//!
//! Defines the cached banner record and the key it is stored under.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Opaque banner payload, a JSON object.
pub type Content = serde_json::Map<String, serde_json::Value>;

// == Cache Key ==
/// Composite key of a cached banner.
///
/// Field order matters: keys sort by feature first, so all banners of one
/// feature form a contiguous range in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CacheKey {
    pub feature_id: i32,
    pub banner_id: i32,
}

impl CacheKey {
    pub fn new(banner_id: i32, feature_id: i32) -> Self {
        Self {
            feature_id,
            banner_id,
        }
    }

    /// Smallest and largest key of a feature, for range scans.
    pub(crate) fn feature_bounds(feature_id: i32) -> (Self, Self) {
        (
            Self::new(i32::MIN, feature_id),
            Self::new(i32::MAX, feature_id),
        )
    }
}

// == Item ==
/// Cached representation of one banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Identity of the persisted banner
    pub banner_id: i32,
    /// Feature this banner belongs to
    pub feature_id: i32,
    /// Tags this banner answers for
    pub tag_ids: BTreeSet<i32>,
    /// Access flag returned to callers
    pub is_active: bool,
    /// Payload returned to callers
    pub content: Content,
}

impl Item {
    /// Derives the store key from the identity fields.
    pub fn key(&self) -> CacheKey {
        CacheKey::new(self.banner_id, self.feature_id)
    }

    /// Returns true if this item answers for the given feature and tag.
    pub fn matches(&self, feature_id: i32, tag_id: i32) -> bool {
        self.feature_id == feature_id && self.tag_ids.contains(&tag_id)
    }
}

// == Cache Hit ==
/// What a successful cache read hands back to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheHit {
    pub content: Content,
    pub is_active: bool,
}
