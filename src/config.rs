//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// How long a cached banner lives from its last write
    pub cache_expiration: Duration,
    /// Time between sweeper ticks; zero disables the sweeper
    pub cleanup_interval: Duration,
    /// HTTP server port
    pub server_port: u16,
    /// Token granting the admin role
    pub admin_token: String,
    /// Token granting the user role
    pub user_token: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_EXPIRATION` - Cache entry lifetime in seconds (default: 300)
    /// - `CACHE_CLEANUP_INTERVAL` - Sweeper interval in seconds, 0 disables (default: 330)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `ADMIN_TOKEN` - Admin token (default: admin_token)
    /// - `USER_TOKEN` - User token (default: user_token)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            cache_expiration: Duration::from_secs(
                parse_var("CACHE_EXPIRATION").unwrap_or(defaults.cache_expiration.as_secs()),
            ),
            cleanup_interval: Duration::from_secs(
                parse_var("CACHE_CLEANUP_INTERVAL")
                    .unwrap_or(defaults.cleanup_interval.as_secs()),
            ),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            admin_token: env::var("ADMIN_TOKEN").unwrap_or(defaults.admin_token),
            user_token: env::var("USER_TOKEN").unwrap_or(defaults.user_token),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_expiration: Duration::from_secs(300),
            cleanup_interval: Duration::from_secs(330),
            server_port: 8080,
            admin_token: "admin_token".to_string(),
            user_token: "user_token".to_string(),
        }
    }
}
