use std::time::Duration;

use uuid::Uuid;

use super::errors::DomainError;
use super::order::{Order, OrderDetail};
use super::product::Product;

pub trait ProductRepository: Send + Sync + 'static {
    /// Active (not soft-deleted) products only.
    fn list(&self) -> Result<Vec<Product>, DomainError>;
    /// Returns `None` for unknown and soft-deleted ids alike.
    fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError>;
    fn insert(&self, product: &Product) -> Result<(), DomainError>;
    /// Both writes touch active rows only and fail with
    /// `DomainError::ProductNotFound` when no such row exists.
    fn update(&self, product: &Product) -> Result<(), DomainError>;
    fn mark_deleted(&self, id: Uuid) -> Result<(), DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Inserts the order and all of its details in one transaction.
    fn create_with_details(&self, order: &Order, details: &[OrderDetail])
        -> Result<(), DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError>;
    fn find_details(&self, order_id: Uuid) -> Result<Vec<OrderDetail>, DomainError>;
    /// Writes the payment fields of an order that still holds its passcode.
    /// Fails with `DomainError::Conflict` when the stored order has already
    /// been confirmed.
    fn update(&self, order: &Order) -> Result<Order, DomainError>;
}

/// Key-value cache with expiry. `get` returns `Ok(None)` for an absent key;
/// every other failure is an error.
pub trait CacheStore: Send + Sync + 'static {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError>;
    fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), DomainError>;
    fn delete(&self, keys: &[String]) -> Result<(), DomainError>;
}
