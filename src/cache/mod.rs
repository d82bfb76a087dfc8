//! Cache Module
//!
//! In-process TTL cache of banners, keyed by banner and feature and looked up
//! by feature and tag. Entries are never refreshed on read.

mod entry;
mod item;
mod stats;
mod store;
mod ttl_cache;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use entry::CacheEntry;
pub use item::{CacheHit, CacheKey, Content, Item};
pub use stats::{CacheStats, StatsSnapshot};
pub use store::ItemStore;
pub use ttl_cache::TtlCache;
