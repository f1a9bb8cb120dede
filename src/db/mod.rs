pub mod dbitems;
pub mod memory;
pub mod store;

pub use dbitems::{PgItemStore, PoolSettings};
pub use memory::MemoryItemStore;
pub use store::{ItemStore, StoreError};
