pub mod catalog_service;
pub mod checkout_service;
pub mod order_service;
pub mod passcode;

pub use catalog_service::CatalogService;
pub use checkout_service::CheckoutService;
pub use order_service::OrderService;
pub use passcode::PasscodeHasher;

use crate::domain::errors::DomainError;

/// Longest value the `VARCHAR(255)` columns accept, in characters.
pub(crate) const MAX_TEXT_LEN: usize = 255;

/// Rejects blank values and values longer than `max` characters.
pub(crate) fn require_text(field: &str, value: &str, max: usize) -> Result<(), DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::InvalidInput(format!("{} is required", field)));
    }
    if value.chars().count() > max {
        return Err(DomainError::InvalidInput(format!(
            "{} must be at most {} characters",
            field, max
        )));
    }
    Ok(())
}
