//! Process-local `ItemRepository`.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{ItemPersistenceError, ItemRepository};
use crate::domain::{Item, ItemDraft, ItemId};

#[derive(Debug)]
struct Store {
    next_id: i64,
    items: BTreeMap<ItemId, Item>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            next_id: 1,
            items: BTreeMap::new(),
        }
    }
}

/// Items held in a map keyed by id.
///
/// Identifiers start at 1 and are never reused, matching a database
/// sequence. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryItemRepository {
    store: Mutex<Store>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self) -> Result<MutexGuard<'_, Store>, ItemPersistenceError> {
        self.store
            .lock()
            .map_err(|_| ItemPersistenceError::query("item store lock poisoned"))
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn list_all(&self) -> Result<Vec<Item>, ItemPersistenceError> {
        Ok(self.store()?.items.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>, ItemPersistenceError> {
        Ok(self.store()?.items.get(&id).cloned())
    }

    async fn insert(&self, draft: &ItemDraft) -> Result<Item, ItemPersistenceError> {
        let mut store = self.store()?;
        let id = ItemId::new(store.next_id);
        store.next_id = store
            .next_id
            .checked_add(1)
            .ok_or_else(|| ItemPersistenceError::query("item id sequence exhausted"))?;
        let item = draft.clone().into_item(id);
        store.items.insert(id, item.clone());
        Ok(item)
    }

    async fn update(
        &self,
        id: ItemId,
        draft: &ItemDraft,
    ) -> Result<Option<Item>, ItemPersistenceError> {
        let mut store = self.store()?;
        let Some(slot) = store.items.get_mut(&id) else {
            return Ok(None);
        };
        *slot = draft.clone().into_item(id);
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: ItemId) -> Result<bool, ItemPersistenceError> {
        Ok(self.store()?.items.remove(&id).is_some())
    }
}
