//! Banner Storage Facade
//!
//! Sits between request handlers and the repository, serving reads from the
//! TTL cache when allowed and keeping the cache in step with every write.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheHit, Item, StatsSnapshot, TtlCache};
use crate::error::{Result, ServiceError};
use crate::storage::{Banner, BannerFilter, BannerPatch, BannerRepository, NewBanner};

// == Banner Storage ==
#[derive(Clone)]
pub struct BannerStorage {
    repo: Arc<dyn BannerRepository>,
    cache: TtlCache,
    /// Orders cache refills against writes. Refills hold it shared across
    /// the repository read and the cache write; writes hold it exclusively
    /// across the repository change and the cache update.
    write_gate: Arc<RwLock<()>>,
}

impl BannerStorage {
    pub fn new(repo: Arc<dyn BannerRepository>, cache: TtlCache) -> Self {
        Self {
            repo,
            cache,
            write_gate: Arc::new(RwLock::new(())),
        }
    }

    pub fn cache(&self) -> &TtlCache {
        &self.cache
    }

    // == User Banner ==
    /// Returns the content and access flag for `(feature_id, tag_id)`.
    ///
    /// Unless `use_last_revision` is set, a live cache entry answers without
    /// touching the repository. Otherwise, and on a miss, the repository is
    /// read and the result is written back into the cache.
    pub async fn user_banner(
        &self,
        feature_id: i32,
        tag_id: i32,
        use_last_revision: bool,
    ) -> Result<Option<CacheHit>> {
        if !use_last_revision {
            if let Some(hit) = self.cache.get(feature_id, tag_id).await {
                debug!(feature_id, tag_id, "Banner served from cache");
                return Ok(Some(hit));
            }
        }

        let _refill = self.write_gate.read().await;
        let Some(banner) = self.repo.find_by_feature_tag(feature_id, tag_id).await? else {
            return Ok(None);
        };
        debug!(
            feature_id,
            tag_id,
            banner_id = banner.id,
            "Banner loaded from repository"
        );

        let item = Item::from(&banner);
        self.cache.add_one(item).await;

        Ok(Some(CacheHit {
            content: banner.content,
            is_active: banner.is_active,
        }))
    }

    // == Create ==
    pub async fn create(&self, banner: NewBanner) -> Result<Banner> {
        let _write = self.write_gate.write().await;
        let stored = self.repo.insert(banner).await?;
        self.cache.add_one(Item::from(&stored)).await;
        Ok(stored)
    }

    // == Update ==
    /// Updates banner `id` and refreshes its cache entries.
    ///
    /// The old entries are dropped first since the feature may have changed.
    pub async fn update(&self, id: i32, patch: BannerPatch) -> Result<Banner> {
        let _write = self.write_gate.write().await;
        let updated = self
            .repo
            .update(id, patch)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("id {}", id)))?;

        self.cache.invalidate(id).await;
        self.cache.add_one(Item::from(&updated)).await;
        Ok(updated)
    }

    // == Delete ==
    pub async fn delete(&self, id: i32) -> Result<()> {
        let _write = self.write_gate.write().await;
        if !self.repo.delete(id).await? {
            return Err(ServiceError::NotFound(format!("id {}", id)));
        }
        let dropped = self.cache.invalidate(id).await;
        debug!(banner_id = id, dropped, "Banner deleted");
        Ok(())
    }

    // == List ==
    /// Lists banners straight from the repository; listings are not cached.
    pub async fn list(&self, filter: &BannerFilter) -> Result<Vec<Banner>> {
        self.repo.list(filter).await
    }

    pub async fn cache_stats(&self) -> StatsSnapshot {
        self.cache.stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryBannerRepository;
    use async_trait::async_trait;
    use serde_json::json;
    use std::time::Duration;
    use tokio::sync::Notify;

    fn storage() -> (BannerStorage, Arc<InMemoryBannerRepository>) {
        let repo = Arc::new(InMemoryBannerRepository::new());
        let storage = BannerStorage::new(repo.clone(), TtlCache::new(Duration::from_secs(300)));
        (storage, repo)
    }

    fn new_banner(feature_id: i32, tags: &[i32], title: &str) -> NewBanner {
        NewBanner {
            feature_id,
            tag_ids: tags.iter().copied().collect(),
            content: json!({ "title": title }).as_object().cloned().unwrap(),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_create_populates_cache() {
        let (storage, _) = storage();
        storage.create(new_banner(1, &[1, 2], "a")).await.unwrap();

        assert_eq!(storage.cache().len().await, 1);
        assert!(storage.cache().get(1, 2).await.is_some());
    }

    #[tokio::test]
    async fn test_cached_read_skips_repository() {
        let (storage, repo) = storage();
        let stored = storage.create(new_banner(1, &[1], "cached")).await.unwrap();

        // Change the repository behind the facade's back
        repo.update(
            stored.id,
            BannerPatch {
                content: Some(json!({"title": "fresh"}).as_object().cloned().unwrap()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let cached = storage.user_banner(1, 1, false).await.unwrap().unwrap();
        assert_eq!(cached.content["title"], "cached");

        let latest = storage.user_banner(1, 1, true).await.unwrap().unwrap();
        assert_eq!(latest.content["title"], "fresh");

        // The latest read was published back into the cache
        let cached = storage.user_banner(1, 1, false).await.unwrap().unwrap();
        assert_eq!(cached.content["title"], "fresh");
    }

    #[tokio::test]
    async fn test_miss_populates_cache() {
        let (storage, repo) = storage();
        repo.insert(new_banner(3, &[4], "x")).await.unwrap();
        assert!(storage.cache().is_empty().await);

        let hit = storage.user_banner(3, 4, false).await.unwrap().unwrap();
        assert_eq!(hit.content["title"], "x");
        assert!(storage.cache().get(3, 4).await.is_some());
    }

    #[tokio::test]
    async fn test_unknown_banner() {
        let (storage, _) = storage();
        assert!(storage.user_banner(9, 9, false).await.unwrap().is_none());
        assert!(storage.user_banner(9, 9, true).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_refreshes_cache() {
        let (storage, _) = storage();
        let stored = storage.create(new_banner(1, &[1], "old")).await.unwrap();

        let patch = BannerPatch {
            feature_id: Some(2),
            is_active: Some(false),
            ..Default::default()
        };
        storage.update(stored.id, patch).await.unwrap();

        assert!(storage.cache().get(1, 1).await.is_none());
        let hit = storage.user_banner(2, 1, false).await.unwrap().unwrap();
        assert!(!hit.is_active);
        assert_eq!(storage.cache().len().await, 1);
    }

    #[tokio::test]
    async fn test_update_missing() {
        let (storage, _) = storage();
        let result = storage.update(5, BannerPatch::default()).await;
        assert!(matches!(result, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_invalidates_cache() {
        let (storage, _) = storage();
        let stored = storage.create(new_banner(1, &[1], "gone")).await.unwrap();

        storage.delete(stored.id).await.unwrap();

        assert!(storage.cache().is_empty().await);
        assert!(storage.user_banner(1, 1, false).await.unwrap().is_none());
        assert!(matches!(
            storage.delete(stored.id).await,
            Err(ServiceError::NotFound(_))
        ));
    }

    /// Repository that parks every `find_by_feature_tag` after reading,
    /// until the test releases it.
    struct PausingRepo {
        inner: InMemoryBannerRepository,
        read_done: Arc<Notify>,
        resume: Arc<Notify>,
    }

    #[async_trait]
    impl BannerRepository for PausingRepo {
        async fn insert(&self, banner: NewBanner) -> Result<Banner> {
            self.inner.insert(banner).await
        }

        async fn find_by_feature_tag(
            &self,
            feature_id: i32,
            tag_id: i32,
        ) -> Result<Option<Banner>> {
            let found = self.inner.find_by_feature_tag(feature_id, tag_id).await;
            self.read_done.notify_one();
            self.resume.notified().await;
            found
        }

        async fn update(&self, id: i32, patch: BannerPatch) -> Result<Option<Banner>> {
            self.inner.update(id, patch).await
        }

        async fn delete(&self, id: i32) -> Result<bool> {
            self.inner.delete(id).await
        }

        async fn list(&self, filter: &BannerFilter) -> Result<Vec<Banner>> {
            self.inner.list(filter).await
        }
    }

    fn pausing_storage() -> (BannerStorage, Arc<Notify>, Arc<Notify>) {
        let read_done = Arc::new(Notify::new());
        let resume = Arc::new(Notify::new());
        let repo = Arc::new(PausingRepo {
            inner: InMemoryBannerRepository::new(),
            read_done: read_done.clone(),
            resume: resume.clone(),
        });
        let storage = BannerStorage::new(repo, TtlCache::new(Duration::from_secs(300)));
        (storage, read_done, resume)
    }

    #[tokio::test]
    async fn test_refill_cannot_resurrect_deleted_banner() {
        let (storage, read_done, resume) = pausing_storage();
        let stored = storage.create(new_banner(1, &[1], "old")).await.unwrap();

        let reader = {
            let storage = storage.clone();
            tokio::spawn(async move { storage.user_banner(1, 1, true).await })
        };
        read_done.notified().await;

        let deleter = {
            let storage = storage.clone();
            tokio::spawn(async move { storage.delete(stored.id).await })
        };

        // The delete waits for the in-flight refill
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!deleter.is_finished());

        resume.notify_one();
        let read = reader.await.unwrap().unwrap();
        assert_eq!(read.unwrap().content["title"], "old");
        deleter.await.unwrap().unwrap();

        assert!(storage.cache().get(1, 1).await.is_none());
        assert!(storage.cache().is_empty().await);
    }

    #[tokio::test]
    async fn test_refill_cannot_overwrite_newer_update() {
        let (storage, read_done, resume) = pausing_storage();
        let stored = storage.create(new_banner(1, &[1], "old")).await.unwrap();

        let reader = {
            let storage = storage.clone();
            tokio::spawn(async move { storage.user_banner(1, 1, true).await })
        };
        read_done.notified().await;

        let updater = {
            let storage = storage.clone();
            let patch = BannerPatch {
                content: json!({"title": "new"}).as_object().cloned(),
                ..Default::default()
            };
            tokio::spawn(async move { storage.update(stored.id, patch).await })
        };

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!updater.is_finished());

        resume.notify_one();
        reader.await.unwrap().unwrap();
        updater.await.unwrap().unwrap();

        let hit = storage.cache().get(1, 1).await.unwrap();
        assert_eq!(hit.content["title"], "new");
    }
}
