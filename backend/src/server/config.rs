//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use pricebook::inbound::http::session_config::SessionSettings;
use pricebook::outbound::password::BcryptPasswordHasher;
use pricebook::outbound::persistence::DbPool;

/// Everything `create_server` needs, resolved ahead of time.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) hasher: BcryptPasswordHasher,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// In-memory storage until [`with_db_pool`](Self::with_db_pool) is called.
    #[must_use]
    pub fn new(
        session: SessionSettings,
        bind_addr: SocketAddr,
        hasher: BcryptPasswordHasher,
    ) -> Self {
        Self {
            session,
            bind_addr,
            hasher,
            db_pool: None,
        }
    }

    /// Store users and items in PostgreSQL.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
