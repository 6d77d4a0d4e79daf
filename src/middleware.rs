//! Request guards: the shared admin key and optional HTTP Basic Auth, plus
//! the CORS policy wrapped around the whole app.
//!
//! The guards read [`AuthConfig`] from app data, so it has to be registered
//! with `App::app_data(web::Data::new(auth))`.

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderMap, AUTHORIZATION};
use actix_web::middleware::Next;
use actix_web::{web, Error};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::config::{AuthConfig, BasicAuthCredentials};
use crate::errors::AppError;

/// Any origin and any request header, for the methods the API serves.
/// Preflight requests are answered here, before any guard runs.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allow_any_header()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .supports_credentials()
        .max_age(3600)
}

pub async fn require_admin_key(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let verdict = match req.app_data::<web::Data<AuthConfig>>() {
        Some(auth) => check_admin_key(req.headers(), &auth.admin_key),
        None => Err(missing_config()),
    };
    verdict?;
    next.call(req).await
}

pub async fn require_basic_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let verdict = match req.app_data::<web::Data<AuthConfig>>() {
        Some(auth) => match &auth.basic {
            Some(expected) => check_basic(req.headers(), expected),
            None => Ok(()),
        },
        None => Err(missing_config()),
    };
    verdict?;
    next.call(req).await
}

fn missing_config() -> AppError {
    AppError::Internal("auth configuration is not registered".to_string())
}

fn check_admin_key(headers: &HeaderMap, expected: &str) -> Result<(), AppError> {
    let provided = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    if provided.is_empty() || provided != expected {
        return Err(AppError::Unauthorized(
            "Invalid 'Authorization' header.".to_string(),
        ));
    }
    Ok(())
}

fn check_basic(headers: &HeaderMap, expected: &BasicAuthCredentials) -> Result<(), AppError> {
    let (username, password) = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(parse_basic)
        .ok_or_else(|| {
            AppError::Unauthorized("Unauthorized - Basic Authentication Required".to_string())
        })?;

    if username != expected.username {
        return Err(AppError::Unauthorized(
            "Unauthorized - Invalid username".to_string(),
        ));
    }
    if password != expected.password {
        return Err(AppError::Unauthorized(
            "Unauthorized - Invalid password".to_string(),
        ));
    }
    Ok(())
}

fn parse_basic(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = String::from_utf8(STANDARD.decode(encoded.trim()).ok()?).ok()?;
    let (username, password) = decoded.split_once(':')?;
    if username.is_empty() && password.is_empty() {
        return None;
    }
    Some((username.to_string(), password.to_string()))
}
