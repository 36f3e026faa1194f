//! HTTP inbound adapter serving the HTML pages.

pub mod auth;
pub mod error;
pub mod forms;
pub mod items;
pub mod routes;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod views;

pub use error::{ApiResult, SignedInResult};
