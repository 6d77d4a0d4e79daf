use actix_web::{web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::order::{
    CartItem, CheckoutInput, Order, OrderDetail, OrderWithDetails, PaymentConfirmation,
};
use crate::errors::AppError;
use crate::state::AppState;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutItemRequest {
    /// Product UUID
    pub id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub email: String,
    pub address: String,
    pub products: Vec<CheckoutItemRequest>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ConfirmRequest {
    pub passcode: String,
    /// Amount paid, must equal the order's grand total
    pub amount: i64,
    pub bank: String,
    pub account_number: String,
}

#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    #[serde(default)]
    pub passcode: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub email: String,
    pub address: String,
    pub grand_total: i64,
    /// Plaintext passcode, only present in the checkout response
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub passcode: Option<String>,
    pub paid_at: Option<DateTime<Utc>>,
    pub paid_bank: Option<String>,
    pub paid_account: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderDetailResponse {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub price: i64,
    pub total: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderWithDetailsResponse {
    pub order: OrderResponse,
    pub details: Vec<OrderDetailResponse>,
}

impl From<Order> for OrderResponse {
    fn from(o: Order) -> Self {
        Self {
            id: o.id,
            email: o.email,
            address: o.address,
            grand_total: o.grand_total,
            passcode: o.passcode,
            paid_at: o.paid_at,
            paid_bank: o.paid_bank,
            paid_account: o.paid_account,
        }
    }
}

impl From<OrderDetail> for OrderDetailResponse {
    fn from(d: OrderDetail) -> Self {
        Self {
            id: d.id,
            order_id: d.order_id,
            product_id: d.product_id,
            quantity: d.quantity,
            price: d.price,
            total: d.total,
        }
    }
}

impl From<OrderWithDetails> for OrderWithDetailsResponse {
    fn from(o: OrderWithDetails) -> Self {
        Self {
            order: o.order.into(),
            details: o.details.into_iter().map(OrderDetailResponse::from).collect(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/v1/checkout
///
/// Prices the cart against the current catalog and stores the order with
/// its lines. The response is the only place the plaintext passcode is
/// ever returned.
#[utoipa::path(
    post,
    path = "/api/v1/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Order placed", body = OrderWithDetailsResponse),
        (status = 400, description = "Invalid cart"),
        (status = 404, description = "Unknown product in cart"),
    ),
    tag = "orders"
)]
pub async fn checkout(
    state: web::Data<AppState>,
    body: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let input = CheckoutInput {
        email: body.email,
        address: body.address,
        items: body
            .products
            .into_iter()
            .map(|p| CartItem {
                product_id: p.id,
                quantity: p.quantity,
            })
            .collect(),
    };

    let placed = web::block(move || state.checkout.checkout(input))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderWithDetailsResponse::from(placed)))
}

/// POST /api/v1/orders/{id}/confirm
#[utoipa::path(
    post,
    path = "/api/v1/orders/{id}/confirm",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    request_body = ConfirmRequest,
    responses(
        (status = 200, description = "Payment recorded", body = OrderResponse),
        (status = 401, description = "Invalid passcode or amount mismatch"),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order already confirmed"),
    ),
    tag = "orders"
)]
pub async fn confirm_order(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<ConfirmRequest>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = body.into_inner();
    let payment = PaymentConfirmation {
        passcode: body.passcode,
        amount: body.amount,
        bank: body.bank,
        account_number: body.account_number,
    };

    let order = web::block(move || state.orders.confirm(id, payment))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// GET /api/v1/orders/{id}?passcode=...
#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
        ("passcode" = String, Query, description = "Passcode issued at checkout"),
    ),
    responses(
        (status = 200, description = "Order with its lines", body = OrderWithDetailsResponse),
        (status = 401, description = "Invalid passcode"),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_order_detail(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    query: web::Query<DetailQuery>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let passcode = query.into_inner().passcode;

    let view = web::block(move || state.orders.get_detail_order(id, &passcode))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(OrderWithDetailsResponse::from(view)))
}
