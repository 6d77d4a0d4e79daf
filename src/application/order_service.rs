use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::cache::OrderCache;
use crate::domain::errors::DomainError;
use crate::domain::order::{Order, OrderDetail, OrderWithDetails, PaymentConfirmation};
use crate::domain::ports::OrderRepository;

use super::passcode::PasscodeHasher;
use super::{require_text, MAX_TEXT_LEN};

/// Passcode-gated operations on placed orders: payment confirmation and the
/// order detail view.
pub struct OrderService {
    repo: Arc<dyn OrderRepository>,
    cache: OrderCache,
    hasher: PasscodeHasher,
}

impl OrderService {
    pub fn new(repo: Arc<dyn OrderRepository>, cache: OrderCache, hasher: PasscodeHasher) -> Self {
        Self {
            repo,
            cache,
            hasher,
        }
    }

    /// Records a claimed payment. Moves the order from unpaid to confirmed
    /// and clears its passcode, so it succeeds at most once per order.
    pub fn confirm(&self, id: Uuid, payment: PaymentConfirmation) -> Result<Order, DomainError> {
        require_text("bank", &payment.bank, MAX_TEXT_LEN)?;
        require_text("account_number", &payment.account_number, MAX_TEXT_LEN)?;

        let mut order = self.load_order(id)?;
        self.check_passcode(&order, &payment.passcode)?;

        if payment.amount != order.grand_total {
            log::warn!(
                "rejected confirmation of order {}: claimed {}, expected {}",
                id,
                payment.amount,
                order.grand_total
            );
            return Err(DomainError::AmountMismatch);
        }

        order.passcode = None;
        order.paid_at = Some(Utc::now());
        order.paid_account = Some(payment.account_number);
        order.paid_bank = Some(payment.bank);
        order.grand_total = payment.amount;

        let updated = match self.repo.update(&order) {
            Ok(updated) => updated,
            Err(e @ DomainError::Conflict(_)) => {
                // The cached copy still showed a passcode.
                self.cache.invalidate(id)?;
                return Err(e);
            }
            Err(e) => return Err(e),
        };
        self.cache.invalidate(id)?;

        log::info!("order {} confirmed", id);
        Ok(updated)
    }

    /// Returns the order and its lines without the passcode hash. Does not
    /// change any state.
    pub fn get_detail_order(&self, id: Uuid, passcode: &str) -> Result<OrderWithDetails, DomainError> {
        let mut order = self.load_order(id)?;
        self.check_passcode(&order, passcode)?;
        order.passcode = None;

        let details = self.load_details(id)?;
        Ok(OrderWithDetails { order, details })
    }

    fn load_order(&self, id: Uuid) -> Result<Order, DomainError> {
        if let Some(order) = self.cache.get_cached(id)? {
            if order.id == id {
                return Ok(order);
            }
        }

        let order = self
            .repo
            .find_by_id(id)?
            .filter(|o| o.id == id)
            .ok_or(DomainError::OrderNotFound)?;
        self.cache.put(&order)?;
        Ok(order)
    }

    fn load_details(&self, order_id: Uuid) -> Result<Vec<OrderDetail>, DomainError> {
        if let Some(details) = self.cache.get_details_cached(order_id)? {
            return Ok(details);
        }

        let details = self.repo.find_details(order_id)?;
        self.cache.put_details(order_id, &details)?;
        Ok(details)
    }

    fn check_passcode(&self, order: &Order, passcode: &str) -> Result<(), DomainError> {
        let Some(hash) = order.passcode.as_deref() else {
            return Err(DomainError::InvalidPasscode);
        };
        if !self.hasher.verify(hash, passcode)? {
            log::warn!("invalid passcode for order {}", order.id);
            return Err(DomainError::InvalidPasscode);
        }
        Ok(())
    }
}
