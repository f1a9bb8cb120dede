use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A persisted catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub tax: f64,
}

/// Validated input for creating an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemCreate {
    /// Name of the item (1-100 characters)
    #[schema(example = "Foo", min_length = 1, max_length = 100)]
    pub name: String,

    /// Optional description of the item
    pub description: Option<String>,

    /// Unit price
    #[schema(example = 50.2)]
    pub price: f64,

    /// Tax applied to the price
    #[schema(example = 10.5)]
    pub tax: f64,
}

/// Response shape of a single item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemView {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub tax: f64,
}

impl From<Item> for ItemView {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            price: item.price,
            tax: item.tax,
        }
    }
}

impl From<&Item> for ItemView {
    fn from(item: &Item) -> Self {
        Self::from(item.clone())
    }
}

/// Response for the price aggregate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ItemSumResponse {
    pub total_price: f64,
}
