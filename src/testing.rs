//! In-memory implementations of the ports, with failure injection.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderDetail};
use crate::domain::ports::{CacheStore, OrderRepository, ProductRepository};
use crate::domain::product::Product;

#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (String, Option<Duration>)>>,
    fail_reads: AtomicBool,
}

impl MemoryCache {
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    pub fn ttl_of(&self, key: &str) -> Option<Option<Duration>> {
        self.entries.lock().unwrap().get(key).map(|(_, ttl)| *ttl)
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DomainError::Upstream("connection refused".to_string()));
        }
        Ok(self.entries.lock().unwrap().get(key).map(|(v, _)| v.clone()))
    }

    fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), DomainError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), ttl));
        Ok(())
    }

    fn delete(&self, keys: &[String]) -> Result<(), DomainError> {
        let mut entries = self.entries.lock().unwrap();
        for key in keys {
            entries.remove(key);
        }
        Ok(())
    }
}

/// Keeps rows in insertion order, mirroring the `created_at` ordering of
/// the Diesel repository.
#[derive(Default)]
pub struct MemoryProductRepository {
    products: Mutex<Vec<Product>>,
    list_calls: AtomicUsize,
}

impl MemoryProductRepository {
    pub fn seed(&self, name: &str, price: i64) -> Product {
        let product = Product {
            id: Uuid::new_v4(),
            name: name.to_string(),
            price,
            is_deleted: false,
        };
        self.products.lock().unwrap().push(product.clone());
        product
    }

    pub fn raw(&self, id: Uuid) -> Option<Product> {
        self.products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

impl ProductRepository for MemoryProductRepository {
    fn list(&self) -> Result<Vec<Product>, DomainError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .filter(|p| !p.is_deleted)
            .cloned()
            .collect())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        Ok(self
            .products
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id && !p.is_deleted)
            .cloned())
    }

    fn insert(&self, product: &Product) -> Result<(), DomainError> {
        self.products.lock().unwrap().push(product.clone());
        Ok(())
    }

    fn update(&self, product: &Product) -> Result<(), DomainError> {
        let mut products = self.products.lock().unwrap();
        let stored = products
            .iter_mut()
            .find(|p| p.id == product.id && !p.is_deleted)
            .ok_or(DomainError::ProductNotFound(product.id))?;
        stored.name = product.name.clone();
        stored.price = product.price;
        Ok(())
    }

    fn mark_deleted(&self, id: Uuid) -> Result<(), DomainError> {
        let mut products = self.products.lock().unwrap();
        let stored = products
            .iter_mut()
            .find(|p| p.id == id && !p.is_deleted)
            .ok_or(DomainError::ProductNotFound(id))?;
        stored.is_deleted = true;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryOrderRepository {
    orders: Mutex<HashMap<Uuid, Order>>,
    details: Mutex<Vec<OrderDetail>>,
    fail_detail_insert: AtomicBool,
    find_calls: AtomicUsize,
}

impl MemoryOrderRepository {
    /// Makes detail inserts fail after the order row was written.
    pub fn fail_detail_insert(&self, fail: bool) {
        self.fail_detail_insert.store(fail, Ordering::SeqCst);
    }

    pub fn order_count(&self) -> usize {
        self.orders.lock().unwrap().len()
    }

    pub fn detail_count(&self) -> usize {
        self.details.lock().unwrap().len()
    }

    pub fn raw(&self, id: Uuid) -> Option<Order> {
        self.orders.lock().unwrap().get(&id).cloned()
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }
}

impl OrderRepository for MemoryOrderRepository {
    fn create_with_details(
        &self,
        order: &Order,
        details: &[OrderDetail],
    ) -> Result<(), DomainError> {
        let mut orders = self.orders.lock().unwrap();
        let mut stored_details = self.details.lock().unwrap();

        // Same statement order as the real transaction: header first, then
        // lines, undoing the header when the lines fail.
        orders.insert(order.id, order.clone());
        if self.fail_detail_insert.load(Ordering::SeqCst) {
            orders.remove(&order.id);
            return Err(DomainError::Upstream(
                "insert into order_details failed".to_string(),
            ));
        }
        stored_details.extend_from_slice(details);
        Ok(())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, DomainError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.orders.lock().unwrap().get(&id).cloned())
    }

    fn find_details(&self, order_id: Uuid) -> Result<Vec<OrderDetail>, DomainError> {
        Ok(self
            .details
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.order_id == order_id)
            .cloned()
            .collect())
    }

    fn update(&self, order: &Order) -> Result<Order, DomainError> {
        let mut orders = self.orders.lock().unwrap();
        match orders.get_mut(&order.id) {
            Some(stored) if stored.passcode.is_some() => {
                *stored = order.clone();
                Ok(stored.clone())
            }
            Some(_) => Err(DomainError::Conflict("order already confirmed".to_string())),
            None => Err(DomainError::OrderNotFound),
        }
    }
}
