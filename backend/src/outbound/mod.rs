//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories on Diesel
//! - **memory**: process-local repositories for database-less runs and tests
//! - **password**: bcrypt hashing
//!
//! Adapters translate between domain types and their backing store and hold
//! no business rules.

pub mod memory;
pub mod password;
pub mod persistence;
