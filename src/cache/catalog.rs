use std::sync::Arc;

use uuid::Uuid;

use crate::config::CacheConfig;
use crate::domain::errors::DomainError;
use crate::domain::ports::CacheStore;
use crate::domain::product::Product;

/// Catalog entries: one aggregate key holding every active product and one
/// key per product id. Both carry the configured catalog TTL.
pub struct CatalogCache {
    store: Arc<dyn CacheStore>,
    config: CacheConfig,
}

impl CatalogCache {
    pub fn new(store: Arc<dyn CacheStore>, config: CacheConfig) -> Self {
        Self { store, config }
    }

    fn product_key(&self, id: Uuid) -> String {
        format!("{}{}", self.config.product_id_prefix, id)
    }

    pub fn list_cached(&self) -> Result<Option<Vec<Product>>, DomainError> {
        super::read(self.store.as_ref(), &self.config.products_key)
    }

    pub fn get_cached(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        super::read(self.store.as_ref(), &self.product_key(id))
    }

    pub fn put_all(&self, products: &[Product]) -> Result<(), DomainError> {
        super::write(
            self.store.as_ref(),
            &self.config.products_key,
            products,
            Some(self.config.catalog_ttl),
        )
    }

    pub fn put(&self, product: &Product) -> Result<(), DomainError> {
        super::write(
            self.store.as_ref(),
            &self.product_key(product.id),
            product,
            Some(self.config.catalog_ttl),
        )
    }

    pub fn invalidate_all(&self) -> Result<(), DomainError> {
        self.store.delete(&[self.config.products_key.clone()])
    }

    pub fn invalidate(&self, id: Uuid) -> Result<(), DomainError> {
        self.store.delete(&[self.product_key(id)])
    }

    /// Drops the aggregate entry and the entry for `id` in one call.
    pub fn invalidate_product(&self, id: Uuid) -> Result<(), DomainError> {
        self.store
            .delete(&[self.config.products_key.clone(), self.product_key(id)])
    }
}
