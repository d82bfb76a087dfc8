//! Storage Module
//!
//! Banner persistence port, its in-memory implementation, and the facade
//! that keeps the TTL cache in front of it.

mod memory;
mod repository;
mod service;

pub use memory::InMemoryBannerRepository;
pub use repository::{Banner, BannerFilter, BannerPatch, BannerRepository, NewBanner};
pub use service::BannerStorage;
