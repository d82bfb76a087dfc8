//! Request and Response models for the banner API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP query strings and bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{
    validate_banner_id, CreateBannerRequest, ListBannersQuery, UpdateBannerRequest,
    UserBannerQuery,
};
pub use responses::{CreateBannerResponse, HealthResponse, StatsResponse};
