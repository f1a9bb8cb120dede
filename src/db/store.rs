use std::future::Future;

use thiserror::Error;

use crate::models::{Item, ItemCreate};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("item {0} not found")]
    NotFound(i64),

    #[error("price total overflowed")]
    Overflow,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence contract for items.
///
/// Implementations own id assignment: every successful `create` returns an
/// id that has never been handed out before.
pub trait ItemStore: Send + Sync + 'static {
    /// Persist a new item and return it with its assigned id.
    fn create(&self, item: ItemCreate) -> impl Future<Output = Result<Item, StoreError>> + Send;

    /// Every stored item in insertion order.
    fn list_all(&self) -> impl Future<Output = Result<Vec<Item>, StoreError>> + Send;

    /// Fails with [`StoreError::NotFound`] when no item has this id.
    fn get_by_id(&self, id: i64) -> impl Future<Output = Result<Item, StoreError>> + Send;

    /// Sum of `price` over all items, `0.0` when empty.
    ///
    /// Fails with [`StoreError::Overflow`] when the total is not finite.
    fn sum_prices(&self) -> impl Future<Output = Result<f64, StoreError>> + Send;
}
