pub mod orders;
pub mod products;

use actix_web::middleware::from_fn;
use actix_web::{web, HttpResponse};
use utoipa::OpenApi;

use crate::errors::AppError;
use crate::middleware::{require_admin_key, require_basic_auth};

#[derive(OpenApi)]
#[openapi(
    paths(
        products::list_products,
        products::get_product,
        products::create_product,
        products::update_product,
        products::delete_product,
        orders::checkout,
        orders::confirm_order,
        orders::get_order_detail,
    ),
    components(schemas(
        products::CreateProductRequest,
        products::UpdateProductRequest,
        products::ProductResponse,
        orders::CheckoutItemRequest,
        orders::CheckoutRequest,
        orders::ConfirmRequest,
        orders::OrderResponse,
        orders::OrderDetailResponse,
        orders::OrderWithDetailsResponse,
    )),
    tags(
        (name = "products", description = "Public catalog"),
        (name = "admin", description = "Catalog management, requires the admin key"),
        (name = "orders", description = "Checkout and passcode-gated order access"),
    )
)]
pub struct ApiDoc;

/// Registers every route. Expects `web::Data<AppState>` and
/// `web::Data<AuthConfig>` to be present as app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::scope("/api/v1")
            .wrap(from_fn(require_basic_auth))
            .route("/products", web::get().to(products::list_products))
            .route("/products/{id}", web::get().to(products::get_product))
            .route("/checkout", web::post().to(orders::checkout))
            .route("/orders/{id}/confirm", web::post().to(orders::confirm_order))
            .route("/orders/{id}", web::get().to(orders::get_order_detail)),
    )
    .service(
        web::scope("/admin")
            .wrap(from_fn(require_admin_key))
            .route("/products", web::post().to(products::create_product))
            .route("/products/{id}", web::put().to(products::update_product))
            .route("/products/{id}", web::delete().to(products::delete_product)),
    )
    .default_service(web::to(route_not_found));
}

async fn route_not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::BadRequest("route not found".to_string()))
}
