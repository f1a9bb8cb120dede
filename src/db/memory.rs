use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::db::store::{ItemStore, StoreError};
use crate::models::{Item, ItemCreate};

#[derive(Debug)]
struct Inner {
    items: Vec<Item>,
    next_id: i64,
}

/// In-process item store.
///
/// Records live in a vector ordered by id. The write lock serialises
/// creates, so id assignment needs no further coordination.
#[derive(Debug)]
pub struct MemoryItemStore {
    inner: RwLock<Inner>,
}

impl MemoryItemStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                items: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemStore for MemoryItemStore {
    async fn create(&self, item: ItemCreate) -> Result<Item, StoreError> {
        let mut inner = self.inner.write().await;

        let id = inner.next_id;
        inner.next_id += 1;

        let stored = Item {
            id,
            name: item.name,
            description: item.description,
            price: item.price,
            tax: item.tax,
        };
        inner.items.push(stored.clone());

        info!(item_id = id, "Item created");
        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<Item>, StoreError> {
        let inner = self.inner.read().await;
        debug!(count = inner.items.len(), "Listing items");
        Ok(inner.items.clone())
    }

    async fn get_by_id(&self, id: i64) -> Result<Item, StoreError> {
        let inner = self.inner.read().await;
        inner
            .items
            .binary_search_by_key(&id, |item| item.id)
            .map(|idx| inner.items[idx].clone())
            .map_err(|_| StoreError::NotFound(id))
    }

    async fn sum_prices(&self) -> Result<f64, StoreError> {
        let inner = self.inner.read().await;
        // `Iterator::sum` starts at -0.0
        let total = inner.items.iter().fold(0.0, |acc, item| acc + item.price);
        if !total.is_finite() {
            return Err(StoreError::Overflow);
        }
        Ok(total)
    }
}
