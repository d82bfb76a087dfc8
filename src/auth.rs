//! Static Token Authorization
//!
//! Maps the `token` request header to a role.

use axum::http::HeaderMap;

use crate::config::Config;
use crate::error::{Result, ServiceError};

/// Header carrying the access token.
pub const TOKEN_HEADER: &str = "token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

// == Access Tokens ==
#[derive(Debug, Clone)]
pub struct AccessTokens {
    admin: String,
    user: String,
}

impl AccessTokens {
    pub fn new(admin: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            admin: admin.into(),
            user: user.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.admin_token.clone(), config.user_token.clone())
    }

    /// Resolves the role of the request's token; unknown or missing is 401.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Role> {
        let token = headers
            .get(TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(ServiceError::Unauthorized)?;

        if token == self.admin {
            Ok(Role::Admin)
        } else if token == self.user {
            Ok(Role::User)
        } else {
            Err(ServiceError::Unauthorized)
        }
    }

    /// Like `authenticate`, but a valid non-admin token is 403.
    pub fn require_admin(&self, headers: &HeaderMap) -> Result<()> {
        match self.authenticate(headers)? {
            Role::Admin => Ok(()),
            Role::User => Err(ServiceError::Forbidden),
        }
    }
}
