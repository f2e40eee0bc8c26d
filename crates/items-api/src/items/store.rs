//! [`ItemStore`]: the insertion-ordered item collection.

use common::protocol::Item;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Errors produced by the item store.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No item has the requested id.
    #[error("Item not found")]
    NotFound(Uuid),
}

/// Items in insertion order, unique by id.
///
/// Reads share the lock; every mutation holds the write lock across its scan
/// and change, so concurrent writers never lose updates or reorder items.
#[derive(Debug, Default)]
pub struct ItemStore {
    items: RwLock<Vec<Item>>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new item with a fresh v4 id.
    pub async fn create(&self, name: String, description: String) -> Item {
        let item = Item {
            id: Uuid::new_v4(),
            name,
            description,
        };
        self.items.write().await.push(item.clone());
        item
    }

    /// All items, oldest first.
    pub async fn list(&self) -> Vec<Item> {
        self.items.read().await.clone()
    }

    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no item has `id`.
    pub async fn get(&self, id: Uuid) -> Result<Item, StoreError> {
        self.items
            .read()
            .await
            .iter()
            .find(|item| item.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    /// Replace `name` and `description` of the item in place. The id and the
    /// item's position are unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no item has `id`; nothing changes.
    pub async fn update(
        &self,
        id: Uuid,
        name: String,
        description: String,
    ) -> Result<Item, StoreError> {
        let mut items = self.items.write().await;
        let item = items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(StoreError::NotFound(id))?;
        item.name = name;
        item.description = description;
        Ok(item.clone())
    }

    /// Remove the item and return its last value. Remaining items keep their
    /// relative order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] if no item has `id`; nothing changes.
    pub async fn delete(&self, id: Uuid) -> Result<Item, StoreError> {
        let mut items = self.items.write().await;
        let index = items
            .iter()
            .position(|item| item.id == id)
            .ok_or(StoreError::NotFound(id))?;
        Ok(items.remove(index))
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}
