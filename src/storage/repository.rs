//! Banner Repository Port
//!
//! Persistent banner records and the trait the storage facade reads and
//! writes them through.

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cache::{Content, Item};
use crate::error::Result;

// == Banner ==
/// A persisted banner. One banner answers for every tag in `tag_ids`
/// within its feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Banner {
    #[serde(rename = "banner_id")]
    pub id: i32,
    pub feature_id: i32,
    pub tag_ids: BTreeSet<i32>,
    pub content: Content,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Banner> for Item {
    fn from(banner: &Banner) -> Self {
        Item {
            banner_id: banner.id,
            feature_id: banner.feature_id,
            tag_ids: banner.tag_ids.clone(),
            is_active: banner.is_active,
            content: banner.content.clone(),
        }
    }
}

/// Fields of a banner about to be created.
#[derive(Debug, Clone)]
pub struct NewBanner {
    pub feature_id: i32,
    pub tag_ids: BTreeSet<i32>,
    pub content: Content,
    pub is_active: bool,
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct BannerPatch {
    pub feature_id: Option<i32>,
    pub tag_ids: Option<BTreeSet<i32>>,
    pub content: Option<Content>,
    pub is_active: Option<bool>,
}

impl BannerPatch {
    pub fn apply(self, banner: &mut Banner) {
        if let Some(feature_id) = self.feature_id {
            banner.feature_id = feature_id;
        }
        if let Some(tag_ids) = self.tag_ids {
            banner.tag_ids = tag_ids;
        }
        if let Some(content) = self.content {
            banner.content = content;
        }
        if let Some(is_active) = self.is_active {
            banner.is_active = is_active;
        }
    }
}

/// Conjunctive filter for listing banners, with paging.
#[derive(Debug, Clone, Default)]
pub struct BannerFilter {
    pub feature_id: Option<i32>,
    pub tag_id: Option<i32>,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl BannerFilter {
    pub fn matches(&self, banner: &Banner) -> bool {
        self.feature_id.map_or(true, |f| banner.feature_id == f)
            && self.tag_id.map_or(true, |t| banner.tag_ids.contains(&t))
    }
}

// == Repository Port ==
/// Durable storage of banners.
///
/// Implementations must keep every (feature, tag) pair owned by at most one
/// banner, rejecting violations with `ServiceError::Conflict`.
#[async_trait]
pub trait BannerRepository: Send + Sync + 'static {
    /// Stores a new banner and returns it with its assigned id.
    async fn insert(&self, banner: NewBanner) -> Result<Banner>;

    async fn find_by_feature_tag(&self, feature_id: i32, tag_id: i32) -> Result<Option<Banner>>;

    /// Applies `patch` to banner `id`. Returns `None` if there is no such banner.
    async fn update(&self, id: i32, patch: BannerPatch) -> Result<Option<Banner>>;

    /// Deletes banner `id`. Returns false if there was no such banner.
    async fn delete(&self, id: i32) -> Result<bool>;

    /// Lists matching banners in ascending id order.
    async fn list(&self, filter: &BannerFilter) -> Result<Vec<Banner>>;
}
