use std::sync::Arc;

use crate::application::{CatalogService, CheckoutService, OrderService, PasscodeHasher};
use crate::cache::{CatalogCache, OrderCache};
use crate::config::{CacheConfig, PasscodeConfig};
use crate::domain::errors::DomainError;
use crate::domain::ports::{CacheStore, OrderRepository, ProductRepository};

/// Services shared by every worker of the HTTP server.
pub struct AppState {
    pub catalog: Arc<CatalogService>,
    pub checkout: CheckoutService,
    pub orders: OrderService,
}

impl AppState {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        orders: Arc<dyn OrderRepository>,
        cache: Arc<dyn CacheStore>,
        cache_config: CacheConfig,
        passcode_config: PasscodeConfig,
    ) -> Result<Self, DomainError> {
        let hasher = PasscodeHasher::new(passcode_config)?;

        let catalog = Arc::new(CatalogService::new(
            products,
            CatalogCache::new(cache.clone(), cache_config.clone()),
        ));
        let checkout = CheckoutService::new(catalog.clone(), orders.clone(), hasher.clone());
        let orders = OrderService::new(orders, OrderCache::new(cache, cache_config), hasher);

        Ok(Self {
            catalog,
            checkout,
            orders,
        })
    }
}
