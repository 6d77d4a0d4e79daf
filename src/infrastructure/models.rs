use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::order::{Order, OrderDetail};
use crate::domain::product::Product;
use crate::schema::{order_details, orders, products};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub price: i64,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = products)]
pub struct NewProductRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub price: i64,
    pub is_deleted: bool,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            name: row.name,
            price: row.price,
            is_deleted: row.is_deleted,
        }
    }
}

impl<'a> From<&'a Product> for NewProductRow<'a> {
    fn from(product: &'a Product) -> Self {
        NewProductRow {
            id: product.id,
            name: &product.name,
            price: product.price,
            is_deleted: product.is_deleted,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub email: String,
    pub address: String,
    pub grand_total: i64,
    pub passcode: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub paid_bank: Option<String>,
    pub paid_account: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub address: &'a str,
    pub grand_total: i64,
    pub passcode: Option<&'a str>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order {
            id: row.id,
            email: row.email,
            address: row.address,
            grand_total: row.grand_total,
            passcode: row.passcode,
            paid_at: row.paid_at,
            paid_bank: row.paid_bank,
            paid_account: row.paid_account,
        }
    }
}

impl<'a> From<&'a Order> for NewOrderRow<'a> {
    fn from(order: &'a Order) -> Self {
        NewOrderRow {
            id: order.id,
            email: &order.email,
            address: &order.address,
            grand_total: order.grand_total,
            passcode: order.passcode.as_deref(),
        }
    }
}

#[derive(
    Debug, Clone, Queryable, Selectable, Identifiable, Associations, Insertable,
)]
#[diesel(table_name = order_details)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderDetailRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: i64,
    pub total: i64,
}

impl From<OrderDetailRow> for OrderDetail {
    fn from(row: OrderDetailRow) -> Self {
        OrderDetail {
            id: row.id,
            order_id: row.order_id,
            product_id: row.product_id,
            quantity: row.quantity,
            price: row.price,
            total: row.total,
        }
    }
}

impl From<&OrderDetail> for OrderDetailRow {
    fn from(detail: &OrderDetail) -> Self {
        OrderDetailRow {
            id: detail.id,
            order_id: detail.order_id,
            product_id: detail.product_id,
            quantity: detail.quantity,
            price: detail.price,
            total: detail.total,
        }
    }
}
