//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`LoginService`, `SignupService`, `ItemsQuery`,
//! `ItemsCommand`) are called by inbound adapters. Driven ports
//! (`UserRepository`, `ItemRepository`, `PasswordHasher`) are implemented by
//! outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod item_repository;
mod items;
mod login_service;
mod password_hasher;
mod user_repository;

#[cfg(test)]
pub use item_repository::MockItemRepository;
pub use item_repository::{ItemPersistenceError, ItemRepository};
#[cfg(test)]
pub use items::{MockItemsCommand, MockItemsQuery};
pub use items::{ItemSummary, ItemsCommand, ItemsQuery};
#[cfg(test)]
pub use login_service::{MockLoginService, MockSignupService};
pub use login_service::{LoginService, SignupService};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
