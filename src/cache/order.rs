use std::sync::Arc;

use uuid::Uuid;

use crate::config::CacheConfig;
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderDetail};
use crate::domain::ports::CacheStore;

/// Single-order lookups plus the immutable detail rows of an order, each
/// under its own key prefix.
pub struct OrderCache {
    store: Arc<dyn CacheStore>,
    config: CacheConfig,
}

impl OrderCache {
    pub fn new(store: Arc<dyn CacheStore>, config: CacheConfig) -> Self {
        Self { store, config }
    }

    fn order_key(&self, id: Uuid) -> String {
        format!("{}{}", self.config.order_prefix, id)
    }

    fn details_key(&self, order_id: Uuid) -> String {
        format!("{}{}", self.config.order_details_prefix, order_id)
    }

    pub fn get_cached(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        super::read(self.store.as_ref(), &self.order_key(id))
    }

    pub fn put(&self, order: &Order) -> Result<(), DomainError> {
        super::write(
            self.store.as_ref(),
            &self.order_key(order.id),
            order,
            self.config.order_ttl,
        )
    }

    pub fn invalidate(&self, id: Uuid) -> Result<(), DomainError> {
        self.store.delete(&[self.order_key(id)])
    }

    pub fn get_details_cached(&self, order_id: Uuid) -> Result<Option<Vec<OrderDetail>>, DomainError> {
        super::read(self.store.as_ref(), &self.details_key(order_id))
    }

    pub fn put_details(&self, order_id: Uuid, details: &[OrderDetail]) -> Result<(), DomainError> {
        super::write(
            self.store.as_ref(),
            &self.details_key(order_id),
            details,
            self.config.order_ttl,
        )
    }
}
