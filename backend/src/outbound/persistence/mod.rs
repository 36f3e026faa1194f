//! PostgreSQL adapters built on Diesel.
//!
//! Repositories convert between Diesel rows (`models.rs`) and domain types;
//! neither rows nor the schema leave this module. Connections come from a
//! `bb8` pool through `diesel-async`.
//!
//! ```ignore
//! use pricebook::outbound::persistence::{DbPool, DieselItemRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/pricebook")).await?;
//! let items = DieselItemRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_item_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_item_repository::DieselItemRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
