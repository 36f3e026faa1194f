//! Builds the handler state from the configured storage backend.

use std::sync::Arc;

use actix_web::web;
use tracing::warn;

use pricebook::domain::ports::{ItemRepository, UserRepository};
use pricebook::domain::{AccountService, ItemService};
use pricebook::inbound::http::state::HttpState;
use pricebook::outbound::memory::{InMemoryItemRepository, InMemoryUserRepository};
use pricebook::outbound::password::BcryptPasswordHasher;
use pricebook::outbound::persistence::{DieselItemRepository, DieselUserRepository};

use super::ServerConfig;

fn state_from_repositories<U, R>(
    users: U,
    items: R,
    hasher: BcryptPasswordHasher,
) -> HttpState
where
    U: UserRepository + 'static,
    R: ItemRepository + 'static,
{
    let accounts = Arc::new(AccountService::new(Arc::new(users), Arc::new(hasher)));
    let items = Arc::new(ItemService::new(Arc::new(items)));
    HttpState::new(accounts.clone(), accounts, items.clone(), items)
}

/// PostgreSQL adapters when a pool is configured, in-memory ones otherwise.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => state_from_repositories(
            DieselUserRepository::new(pool.clone()),
            DieselItemRepository::new(pool.clone()),
            config.hasher,
        ),
        None => {
            warn!("no database configured; users and items are kept in memory");
            state_from_repositories(
                InMemoryUserRepository::new(),
                InMemoryItemRepository::new(),
                config.hasher,
            )
        }
    };
    web::Data::new(state)
}
