use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub email: String,
    pub address: String,
    pub grand_total: i64,
    /// Hashed passcode while the order is unpaid. Only the checkout response
    /// ever carries the plaintext here.
    pub passcode: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub paid_bank: Option<String>,
    pub paid_account: Option<String>,
}

impl Order {
    pub fn is_paid(&self) -> bool {
        self.paid_at.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: i64,
    pub total: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderWithDetails {
    pub order: Order,
    pub details: Vec<OrderDetail>,
}

#[derive(Debug, Clone)]
pub struct CartItem {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone)]
pub struct CheckoutInput {
    pub email: String,
    pub address: String,
    pub items: Vec<CartItem>,
}

#[derive(Debug, Clone)]
pub struct PaymentConfirmation {
    pub passcode: String,
    pub amount: i64,
    pub bank: String,
    pub account_number: String,
}
