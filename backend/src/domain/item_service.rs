//! Item domain service implementing the item driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    ItemPersistenceError, ItemRepository, ItemSummary, ItemsCommand, ItemsQuery,
};
use crate::domain::{Error, Item, ItemDraft, ItemId, Price};

/// Item service backed by an [`ItemRepository`].
#[derive(Clone)]
pub struct ItemService<R> {
    repository: Arc<R>,
}

impl<R> ItemService<R> {
    /// Create a new service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_persistence_error(error: ItemPersistenceError) -> Error {
    match error {
        ItemPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("item repository unavailable: {message}"))
        }
        ItemPersistenceError::Query { message } => {
            Error::internal(format!("item repository error: {message}"))
        }
    }
}

fn item_not_found(id: ItemId) -> Error {
    Error::not_found(format!("item {id} not found"))
}

#[async_trait]
impl<R> ItemsQuery for ItemService<R>
where
    R: ItemRepository,
{
    async fn list_items(&self) -> Result<Vec<Item>, Error> {
        self.repository
            .list_all()
            .await
            .map_err(map_persistence_error)
    }

    async fn get_item(&self, id: ItemId) -> Result<Item, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| item_not_found(id))
    }

    async fn summarise(&self) -> Result<ItemSummary, Error> {
        let items = self.list_items().await?;
        let total = Price::checked_sum(items.iter().map(Item::price))
            .ok_or_else(|| Error::internal("item total overflowed"))?;
        Ok(ItemSummary { items, total })
    }
}

#[async_trait]
impl<R> ItemsCommand for ItemService<R>
where
    R: ItemRepository,
{
    async fn add_item(&self, draft: &ItemDraft) -> Result<Item, Error> {
        let item = self
            .repository
            .insert(draft)
            .await
            .map_err(map_persistence_error)?;
        info!(item_id = %item.id(), "item created");
        Ok(item)
    }

    async fn edit_item(&self, id: ItemId, draft: &ItemDraft) -> Result<Item, Error> {
        let item = self
            .repository
            .update(id, draft)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| item_not_found(id))?;
        info!(item_id = %id, "item updated");
        Ok(item)
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), Error> {
        let deleted = self
            .repository
            .delete(id)
            .await
            .map_err(map_persistence_error)?;
        if !deleted {
            return Err(item_not_found(id));
        }
        info!(item_id = %id, "item deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for item use-cases over a mocked repository.
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockItemRepository;
    use mockall::predicate::eq;
    use rstest::rstest;

    fn item(id: i64, name: &str, price: &str) -> Item {
        ItemDraft::try_from_parts(name, price)
            .expect("valid fixture item")
            .into_item(ItemId::new(id))
    }

    fn service(repository: MockItemRepository) -> ItemService<MockItemRepository> {
        ItemService::new(Arc::new(repository))
    }

    #[tokio::test]
    async fn summarise_totals_all_prices() {
        let mut repository = MockItemRepository::new();
        repository.expect_list_all().times(1).returning(|| {
            Ok(vec![
                item(1, "Widget", "9.99"),
                item(2, "Gadget", "0.01"),
                item(3, "Gizmo", "15"),
            ])
        });

        let summary = service(repository).summarise().await.expect("summary");

        assert_eq!(summary.items.len(), 3);
        assert_eq!(summary.total, Price::from_cents(2500));
    }

    #[tokio::test]
    async fn summarise_of_no_items_is_zero() {
        let mut repository = MockItemRepository::new();
        repository.expect_list_all().returning(|| Ok(Vec::new()));

        let summary = service(repository).summarise().await.expect("summary");

        assert!(summary.items.is_empty());
        assert_eq!(summary.total, Price::ZERO);
    }

    #[tokio::test]
    async fn summarise_reports_overflow_as_internal() {
        let mut repository = MockItemRepository::new();
        repository.expect_list_all().returning(|| {
            Ok(vec![
                ItemDraft::new(
                    crate::domain::ItemName::new("Huge").expect("name"),
                    Price::from_cents(i64::MAX),
                )
                .into_item(ItemId::new(1)),
                item(2, "Small", "0.01"),
            ])
        });

        let err = service(repository).summarise().await.expect_err("overflow");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[tokio::test]
    async fn get_item_maps_missing_row_to_not_found() {
        let mut repository = MockItemRepository::new();
        repository
            .expect_find_by_id()
            .with(eq(ItemId::new(42)))
            .returning(|_| Ok(None));

        let err = service(repository)
            .get_item(ItemId::new(42))
            .await
            .expect_err("missing item");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), "item 42 not found");
    }

    #[tokio::test]
    async fn edit_of_unknown_item_is_not_found_and_never_inserts() {
        let mut repository = MockItemRepository::new();
        repository.expect_update().returning(|_, _| Ok(None));
        repository.expect_insert().never();

        let draft = ItemDraft::try_from_parts("Widget", "1.00").expect("draft");
        let err = service(repository)
            .edit_item(ItemId::new(7), &draft)
            .await
            .expect_err("unknown item");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn delete_of_missing_item_is_not_found() {
        let mut repository = MockItemRepository::new();
        repository.expect_delete().returning(|_| Ok(false));

        let err = service(repository)
            .delete_item(ItemId::new(3))
            .await
            .expect_err("already gone");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn add_item_returns_stored_item() {
        let mut repository = MockItemRepository::new();
        repository
            .expect_insert()
            .times(1)
            .returning(|draft| Ok(draft.clone().into_item(ItemId::new(1))));

        let draft = ItemDraft::try_from_parts("Widget", "9.99").expect("draft");
        let stored = service(repository).add_item(&draft).await.expect("stored");
        assert_eq!(stored.name().as_ref(), "Widget");
        assert_eq!(stored.price(), Price::from_cents(999));
    }

    #[rstest]
    #[case(ItemPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(ItemPersistenceError::query("syntax"), ErrorCode::InternalError)]
    #[tokio::test]
    async fn persistence_failures_map_to_storage_errors(
        #[case] failure: ItemPersistenceError,
        #[case] expected: ErrorCode,
    ) {
        let mut repository = MockItemRepository::new();
        repository
            .expect_list_all()
            .returning(move || Err(failure.clone()));

        let err = service(repository).list_items().await.expect_err("failure");
        assert_eq!(err.code(), expected);
        assert!(err.is_storage_failure());
    }
}
