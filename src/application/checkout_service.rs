use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{CheckoutInput, Order, OrderDetail, OrderWithDetails};
use crate::domain::ports::OrderRepository;
use crate::domain::product::Product;

use super::catalog_service::CatalogService;
use super::passcode::{generate_passcode, PasscodeHasher};
use super::{require_text, MAX_TEXT_LEN};

/// Turns a cart into a persisted order priced against the current catalog.
pub struct CheckoutService {
    catalog: Arc<CatalogService>,
    orders: Arc<dyn OrderRepository>,
    hasher: PasscodeHasher,
}

impl CheckoutService {
    pub fn new(
        catalog: Arc<CatalogService>,
        orders: Arc<dyn OrderRepository>,
        hasher: PasscodeHasher,
    ) -> Self {
        Self {
            catalog,
            orders,
            hasher,
        }
    }

    /// Prices and stores the order. The returned order carries the plaintext
    /// passcode; this response is the only place it ever appears.
    pub fn checkout(&self, input: CheckoutInput) -> Result<OrderWithDetails, DomainError> {
        validate(&input)?;

        let catalog: HashMap<Uuid, Product> = self
            .catalog
            .list_products()?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let order_id = Uuid::new_v4();
        let mut grand_total: i64 = 0;
        let mut details = Vec::with_capacity(input.items.len());

        for item in &input.items {
            let product = catalog
                .get(&item.product_id)
                .ok_or(DomainError::ProductNotFound(item.product_id))?;
            let total = product
                .price
                .checked_mul(i64::from(item.quantity))
                .ok_or_else(overflow)?;
            grand_total = grand_total.checked_add(total).ok_or_else(overflow)?;

            details.push(OrderDetail {
                id: Uuid::new_v4(),
                order_id,
                product_id: product.id,
                quantity: item.quantity,
                price: product.price,
                total,
            });
        }

        let passcode = generate_passcode();
        let hashed = self.hasher.hash(&passcode)?;

        let mut order = Order {
            id: order_id,
            email: input.email.trim().to_string(),
            address: input.address.trim().to_string(),
            grand_total,
            passcode: Some(hashed),
            paid_at: None,
            paid_bank: None,
            paid_account: None,
        };
        self.orders.create_with_details(&order, &details)?;

        log::info!(
            "checked out order {} with {} line(s), total {}",
            order.id,
            details.len(),
            order.grand_total
        );

        order.passcode = Some(passcode);
        Ok(OrderWithDetails { order, details })
    }
}

fn validate(input: &CheckoutInput) -> Result<(), DomainError> {
    require_text("email", &input.email, MAX_TEXT_LEN)?;
    require_text("address", &input.address, usize::MAX)?;
    if input.items.is_empty() {
        return Err(DomainError::InvalidInput(
            "cart must contain at least one product".to_string(),
        ));
    }
    if let Some(item) = input.items.iter().find(|item| item.quantity <= 0) {
        return Err(DomainError::InvalidInput(format!(
            "quantity for product {} must be greater than zero",
            item.product_id
        )));
    }
    Ok(())
}

fn overflow() -> DomainError {
    DomainError::InvalidInput("order total is too large".to_string())
}
