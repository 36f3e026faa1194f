//! Pricebook: a small authenticated catalogue of priced items.
//!
//! Layout follows ports and adapters: [`domain`] holds the entities, the
//! services and the port traits; [`inbound`] serves HTML over HTTP;
//! [`outbound`] implements storage and hashing.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use middleware::Trace;
