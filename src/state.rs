use std::sync::Arc;

use crate::db::ItemStore;

/// Shared handler state
pub struct AppState<S> {
    pub store: Arc<S>,
}

impl<S: ItemStore> AppState<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

// Manual impl: `#[derive(Clone)]` would demand `S: Clone`.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}
