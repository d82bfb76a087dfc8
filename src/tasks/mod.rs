//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiration sweeper: removes expired cache entries at the configured interval

mod sweeper;

pub use sweeper::{spawn_sweeper, SweeperHandle};
