//! Driven port for item persistence.

use async_trait::async_trait;

use crate::domain::{Item, ItemDraft, ItemId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by item repository adapters.
    pub enum ItemPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "item repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "item repository query failed: {message}",
    }
}

/// Storage for [`Item`] records. Identifiers are assigned by the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// All items ordered by identifier.
    async fn list_all(&self) -> Result<Vec<Item>, ItemPersistenceError>;

    /// Fetch one item.
    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, ItemPersistenceError>;

    /// Insert a new item and return it with its assigned identifier.
    async fn insert(&self, draft: &ItemDraft) -> Result<Item, ItemPersistenceError>;

    /// Replace the fields of an existing item. `None` when the id is unknown.
    async fn update(
        &self,
        id: ItemId,
        draft: &ItemDraft,
    ) -> Result<Option<Item>, ItemPersistenceError>;

    /// Remove an item. Returns whether a row was deleted.
    async fn delete(&self, id: ItemId) -> Result<bool, ItemPersistenceError>;
}
