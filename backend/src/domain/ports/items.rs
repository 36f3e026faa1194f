//! Driving ports for the item pages.

use async_trait::async_trait;

use crate::domain::{Error, Item, ItemDraft, ItemId, Price};

/// Every item together with the sum of their prices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSummary {
    pub items: Vec<Item>,
    pub total: Price,
}

/// Read-side use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemsQuery: Send + Sync {
    /// All items ordered by id.
    async fn list_items(&self) -> Result<Vec<Item>, Error>;

    /// One item, or [`ErrorCode::NotFound`](crate::domain::ErrorCode::NotFound).
    async fn get_item(&self, id: ItemId) -> Result<Item, Error>;

    /// All items plus their total price.
    async fn summarise(&self) -> Result<ItemSummary, Error>;
}

/// Write-side use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemsCommand: Send + Sync {
    /// Persist a new item.
    async fn add_item(&self, draft: &ItemDraft) -> Result<Item, Error>;

    /// Replace an existing item's fields; never creates a row.
    async fn edit_item(&self, id: ItemId, draft: &ItemDraft) -> Result<Item, Error>;

    /// Remove an item, or fail with `NotFound` when it is already gone.
    async fn delete_item(&self, id: ItemId) -> Result<(), Error>;
}
