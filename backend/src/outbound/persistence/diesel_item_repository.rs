//! PostgreSQL-backed `ItemRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{ItemPersistenceError, ItemRepository};
use crate::domain::{Item, ItemDraft, ItemId, ItemName, Price};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{ItemChangeset, ItemRow, NewItemRow};
use super::pool::{DbPool, PoolError};
use super::schema::items;

/// Diesel implementation of [`ItemRepository`].
#[derive(Clone)]
pub struct DieselItemRepository {
    pool: DbPool,
}

impl DieselItemRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ItemPersistenceError {
    map_basic_pool_error(error, ItemPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ItemPersistenceError {
    map_basic_diesel_error(
        error,
        ItemPersistenceError::query,
        ItemPersistenceError::connection,
    )
}

fn row_to_item(row: ItemRow) -> Result<Item, ItemPersistenceError> {
    let name = ItemName::new(&row.name).map_err(|err| {
        warn!(item_id = row.id, error = %err, "stored item name failed validation");
        ItemPersistenceError::query("stored item name is invalid")
    })?;
    Ok(Item::new(
        ItemId::new(row.id),
        name,
        Price::from_cents(row.price_cents),
    ))
}

fn changeset(draft: &ItemDraft) -> ItemChangeset<'_> {
    ItemChangeset {
        name: draft.name().as_ref(),
        price_cents: draft.price().cents(),
    }
}

#[async_trait]
impl ItemRepository for DieselItemRepository {
    async fn list_all(&self) -> Result<Vec<Item>, ItemPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ItemRow> = items::table
            .order(items::id.asc())
            .select(ItemRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_item).collect()
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, ItemPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ItemRow> = items::table
            .find(id.get())
            .select(ItemRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_item).transpose()
    }

    async fn insert(&self, draft: &ItemDraft) -> Result<Item, ItemPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewItemRow {
            name: draft.name().as_ref(),
            price_cents: draft.price().cents(),
        };

        let row: ItemRow = diesel::insert_into(items::table)
            .values(&new_row)
            .returning(ItemRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_item(row)
    }

    async fn update(
        &self,
        id: ItemId,
        draft: &ItemDraft,
    ) -> Result<Option<Item>, ItemPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<ItemRow> = diesel::update(items::table.find(id.get()))
            .set(&changeset(draft))
            .returning(ItemRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_item).transpose()
    }

    async fn delete(&self, id: ItemId) -> Result<bool, ItemPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(items::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
