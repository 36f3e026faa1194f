//! Driving ports for account use-cases: logging in and signing up.
//!
//! Inbound adapters call these to authenticate or register without knowing
//! how users or password hashes are stored.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, SignupCredentials, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    ///
    /// Unknown usernames and wrong passwords both yield
    /// [`ErrorCode::Unauthorized`](crate::domain::ErrorCode::Unauthorized).
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Domain use-case port for account creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupService: Send + Sync {
    /// Create an account and return its id.
    ///
    /// A taken username yields [`ErrorCode::Conflict`](crate::domain::ErrorCode::Conflict).
    async fn register(&self, credentials: &SignupCredentials) -> Result<UserId, Error>;
}
