pub mod api;

pub use api::{create_app, create_item_routes};
