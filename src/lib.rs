//! Banner Cache - banner lookup service
//!
//! Serves banner content by feature and tag through an in-process TTL cache
//! with a background expiration sweeper.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod storage;
pub mod tasks;

pub use api::AppState;
pub use cache::TtlCache;
pub use config::Config;
pub use tasks::{spawn_sweeper, SweeperHandle};
