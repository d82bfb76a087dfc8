//! Request DTOs for the banner API
//!
//! Defines query strings and incoming HTTP request bodies.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::cache::Content;
use crate::storage::{BannerFilter, BannerPatch, NewBanner};

fn check_id(name: &str, value: i32) -> Option<String> {
    (value <= 0).then(|| format!("{} must be a positive integer", name))
}

/// Checks the `:id` path segment of `/banner/:id`.
pub fn validate_banner_id(id: i32) -> Option<String> {
    check_id("id", id)
}

/// Query string of `GET /user_banner`
#[derive(Debug, Clone, Deserialize)]
pub struct UserBannerQuery {
    pub tag_id: i32,
    pub feature_id: i32,
    /// Bypass the cache and read the latest stored revision
    #[serde(default)]
    pub use_last_revision: bool,
}

impl UserBannerQuery {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        check_id("tag_id", self.tag_id).or_else(|| check_id("feature_id", self.feature_id))
    }
}

/// Query string of `GET /banner`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListBannersQuery {
    pub feature_id: Option<i32>,
    pub tag_id: Option<i32>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl From<ListBannersQuery> for BannerFilter {
    fn from(query: ListBannersQuery) -> Self {
        BannerFilter {
            feature_id: query.feature_id,
            tag_id: query.tag_id,
            limit: query.limit,
            offset: query.offset.unwrap_or(0),
        }
    }
}

/// Request body of `POST /banner`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBannerRequest {
    pub tag_ids: Vec<i32>,
    pub feature_id: i32,
    pub content: Content,
    #[serde(default)]
    pub is_active: bool,
}

impl CreateBannerRequest {
    pub fn validate(&self) -> Option<String> {
        if self.tag_ids.is_empty() {
            return Some("tag_ids cannot be empty".to_string());
        }
        check_id("feature_id", self.feature_id).or_else(|| {
            self.tag_ids
                .iter()
                .find_map(|tag| check_id("tag_ids entry", *tag))
        })
    }
}

impl From<CreateBannerRequest> for NewBanner {
    fn from(req: CreateBannerRequest) -> Self {
        NewBanner {
            feature_id: req.feature_id,
            tag_ids: req.tag_ids.into_iter().collect(),
            content: req.content,
            is_active: req.is_active,
        }
    }
}

/// Request body of `PATCH /banner/:id`; absent fields stay unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBannerRequest {
    pub tag_ids: Option<Vec<i32>>,
    pub feature_id: Option<i32>,
    pub content: Option<Content>,
    pub is_active: Option<bool>,
}

impl UpdateBannerRequest {
    pub fn validate(&self) -> Option<String> {
        if let Some(tag_ids) = &self.tag_ids {
            if tag_ids.is_empty() {
                return Some("tag_ids cannot be empty".to_string());
            }
            if let Some(msg) = tag_ids.iter().find_map(|tag| check_id("tag_ids entry", *tag)) {
                return Some(msg);
            }
        }
        self.feature_id.and_then(|id| check_id("feature_id", id))
    }
}

impl From<UpdateBannerRequest> for BannerPatch {
    fn from(req: UpdateBannerRequest) -> Self {
        BannerPatch {
            feature_id: req.feature_id,
            tag_ids: req.tag_ids.map(|tags| tags.into_iter().collect::<BTreeSet<_>>()),
            content: req.content,
            is_active: req.is_active,
        }
    }
}
