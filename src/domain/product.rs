use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog entry. Prices are integer minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub is_deleted: bool,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: i64,
}

/// Fields left as `None` keep their current value.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<i64>,
}
