//! In-Memory Banner Repository
//!
//! `BannerRepository` backed by a map behind a readers-writer lock. Used by
//! the server binary and by tests.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::{Result, ServiceError};
use crate::storage::{Banner, BannerFilter, BannerPatch, BannerRepository, NewBanner};

#[derive(Debug, Default)]
struct Tables {
    next_id: i32,
    banners: BTreeMap<i32, Banner>,
}

impl Tables {
    /// Returns the first tag of `(feature_id, tag_ids)` already owned by a
    /// banner other than `except`.
    fn taken_tag(
        &self,
        feature_id: i32,
        tag_ids: &BTreeSet<i32>,
        except: Option<i32>,
    ) -> Option<i32> {
        self.banners
            .values()
            .filter(|b| Some(b.id) != except && b.feature_id == feature_id)
            .find_map(|b| tag_ids.intersection(&b.tag_ids).next().copied())
    }
}

fn conflict(feature_id: i32, tag_id: i32) -> ServiceError {
    ServiceError::Conflict(format!(
        "feature {} and tag {} already belong to another banner",
        feature_id, tag_id
    ))
}

// == In-Memory Repository ==
#[derive(Debug, Default)]
pub struct InMemoryBannerRepository {
    tables: RwLock<Tables>,
}

impl InMemoryBannerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BannerRepository for InMemoryBannerRepository {
    async fn insert(&self, banner: NewBanner) -> Result<Banner> {
        let mut tables = self.tables.write().await;

        if let Some(tag) = tables.taken_tag(banner.feature_id, &banner.tag_ids, None) {
            return Err(conflict(banner.feature_id, tag));
        }

        tables.next_id += 1;
        let now = Utc::now();
        let stored = Banner {
            id: tables.next_id,
            feature_id: banner.feature_id,
            tag_ids: banner.tag_ids,
            content: banner.content,
            is_active: banner.is_active,
            created_at: now,
            updated_at: now,
        };
        tables.banners.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_feature_tag(&self, feature_id: i32, tag_id: i32) -> Result<Option<Banner>> {
        let tables = self.tables.read().await;
        Ok(tables
            .banners
            .values()
            .find(|b| b.feature_id == feature_id && b.tag_ids.contains(&tag_id))
            .cloned())
    }

    async fn update(&self, id: i32, patch: BannerPatch) -> Result<Option<Banner>> {
        let mut tables = self.tables.write().await;

        let Some(current) = tables.banners.get(&id) else {
            return Ok(None);
        };
        let mut updated = current.clone();
        patch.apply(&mut updated);

        if let Some(tag) = tables.taken_tag(updated.feature_id, &updated.tag_ids, Some(id)) {
            return Err(conflict(updated.feature_id, tag));
        }

        updated.updated_at = Utc::now();
        tables.banners.insert(id, updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: i32) -> Result<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.banners.remove(&id).is_some())
    }

    async fn list(&self, filter: &BannerFilter) -> Result<Vec<Banner>> {
        let tables = self.tables.read().await;
        Ok(tables
            .banners
            .values()
            .filter(|b| filter.matches(b))
            .skip(filter.offset)
            .take(filter.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }
}
