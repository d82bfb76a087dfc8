//! API Handlers
//!
//! HTTP request handlers for each banner service endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};

use crate::auth::{AccessTokens, Role};
use crate::cache::{Content, TtlCache};
use crate::config::Config;
use crate::error::{Result, ServiceError};
use crate::models::{
    validate_banner_id, CreateBannerRequest, CreateBannerResponse, HealthResponse,
    ListBannersQuery, StatsResponse, UpdateBannerRequest, UserBannerQuery,
};
use crate::storage::{Banner, BannerStorage, InMemoryBannerRepository};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache-fronted banner storage
    pub storage: BannerStorage,
    /// Static tokens for the admin and user roles
    pub tokens: AccessTokens,
}

impl AppState {
    pub fn new(storage: BannerStorage, tokens: AccessTokens) -> Self {
        Self { storage, tokens }
    }

    /// Creates a new AppState from configuration, backed by an in-memory
    /// repository.
    ///
    /// The sweeper is not started here; see `spawn_sweeper`.
    pub fn from_config(config: &Config) -> Self {
        let cache = TtlCache::new(config.cache_expiration);
        let repo = Arc::new(InMemoryBannerRepository::new());
        Self::new(
            BannerStorage::new(repo, cache),
            AccessTokens::from_config(config),
        )
    }
}

fn invalid(msg: Option<String>) -> Result<()> {
    match msg {
        Some(msg) => Err(ServiceError::InvalidRequest(msg)),
        None => Ok(()),
    }
}

/// Handler for GET /user_banner
///
/// Returns the banner content for a feature and tag. Inactive banners are
/// only visible to admins.
pub async fn user_banner_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<UserBannerQuery>,
) -> Result<Json<Content>> {
    let role = state.tokens.authenticate(&headers)?;
    invalid(query.validate())?;

    let not_found = || {
        ServiceError::NotFound(format!(
            "feature {}, tag {}",
            query.feature_id, query.tag_id
        ))
    };

    let hit = state
        .storage
        .user_banner(query.feature_id, query.tag_id, query.use_last_revision)
        .await?
        .ok_or_else(not_found)?;

    if !hit.is_active && role != Role::Admin {
        return Err(not_found());
    }
    Ok(Json(hit.content))
}

/// Handler for GET /banner
///
/// Lists banners filtered by feature and/or tag. Admin only.
pub async fn list_banners_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListBannersQuery>,
) -> Result<Json<Vec<Banner>>> {
    state.tokens.require_admin(&headers)?;

    let banners = state.storage.list(&query.into()).await?;
    Ok(Json(banners))
}

/// Handler for POST /banner
///
/// Creates a banner. Admin only.
pub async fn create_banner_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateBannerRequest>,
) -> Result<(StatusCode, Json<CreateBannerResponse>)> {
    state.tokens.require_admin(&headers)?;
    invalid(req.validate())?;

    let banner = state.storage.create(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreateBannerResponse {
            banner_id: banner.id,
        }),
    ))
}

/// Handler for PATCH /banner/:id
///
/// Partially updates a banner. Admin only.
pub async fn update_banner_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
    Json(req): Json<UpdateBannerRequest>,
) -> Result<Json<Banner>> {
    state.tokens.require_admin(&headers)?;
    invalid(validate_banner_id(id))?;
    invalid(req.validate())?;

    let banner = state.storage.update(id, req.into()).await?;
    Ok(Json(banner))
}

/// Handler for DELETE /banner/:id
///
/// Deletes a banner. Admin only.
pub async fn delete_banner_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    state.tokens.require_admin(&headers)?;
    invalid(validate_banner_id(id))?;

    state.storage.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(state.storage.cache_stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
