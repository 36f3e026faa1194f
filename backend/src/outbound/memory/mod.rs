//! In-memory adapters.
//!
//! Used when no database is configured and by the HTTP flow tests. State
//! lives behind a `std::sync::Mutex`; no lock is held across an `.await`.

mod item_repository;
mod user_repository;

pub use item_repository::InMemoryItemRepository;
pub use user_repository::InMemoryUserRepository;
