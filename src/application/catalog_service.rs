use std::sync::Arc;

use uuid::Uuid;

use crate::cache::CatalogCache;
use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::{NewProduct, Product, ProductUpdate};

use super::{require_text, MAX_TEXT_LEN};

/// Product catalog with a read-through, write-invalidate cache in front of
/// the store.
pub struct CatalogService {
    repo: Arc<dyn ProductRepository>,
    cache: CatalogCache,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn ProductRepository>, cache: CatalogCache) -> Self {
        Self { repo, cache }
    }

    pub fn list_products(&self) -> Result<Vec<Product>, DomainError> {
        if let Some(products) = self.cache.list_cached()? {
            return Ok(products);
        }

        let products = self.repo.list()?;
        self.cache.put_all(&products)?;
        Ok(products)
    }

    pub fn get_product(&self, id: Uuid) -> Result<Product, DomainError> {
        if let Some(product) = self.cache.get_cached(id)? {
            return Ok(product);
        }

        let product = self
            .repo
            .find_by_id(id)?
            .filter(|p| p.id == id && !p.is_deleted)
            .ok_or(DomainError::ProductNotFound(id))?;
        self.cache.put(&product)?;
        Ok(product)
    }

    pub fn create_product(&self, input: NewProduct) -> Result<Product, DomainError> {
        validate_name(&input.name)?;
        validate_price(input.price)?;

        let product = Product {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            price: input.price,
            is_deleted: false,
        };
        self.repo.insert(&product)?;
        self.cache.invalidate_product(product.id)?;

        log::info!("created product {}", product.id);
        Ok(product)
    }

    pub fn update_product(&self, id: Uuid, input: ProductUpdate) -> Result<Product, DomainError> {
        let current = self.get_product(id)?;

        let mut updated = current.clone();
        if let Some(name) = input.name {
            validate_name(&name)?;
            updated.name = name.trim().to_string();
        }
        if let Some(price) = input.price {
            validate_price(price)?;
            updated.price = price;
        }
        if updated == current {
            return Err(DomainError::InvalidInput("no changes detected".to_string()));
        }

        self.invalidate_after_write(id, self.repo.update(&updated))?;

        log::info!("updated product {}", id);
        Ok(updated)
    }

    pub fn delete_product(&self, id: Uuid) -> Result<(), DomainError> {
        self.get_product(id)?;

        self.invalidate_after_write(id, self.repo.mark_deleted(id))?;

        log::info!("deleted product {}", id);
        Ok(())
    }

    /// Drops the product's cache entries after a store write, including a
    /// write that found no active row.
    fn invalidate_after_write(&self, id: Uuid, written: Result<(), DomainError>) -> Result<(), DomainError> {
        match written {
            Ok(()) => self.cache.invalidate_product(id),
            Err(e @ DomainError::ProductNotFound(_)) => {
                self.cache.invalidate_product(id)?;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    require_text("name", name, MAX_TEXT_LEN)
}

fn validate_price(price: i64) -> Result<(), DomainError> {
    if price < 0 {
        return Err(DomainError::InvalidInput("price must not be negative".to_string()));
    }
    Ok(())
}
