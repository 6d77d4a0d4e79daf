use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("product with ID {0} not found")]
    ProductNotFound(Uuid),
    #[error("order not found")]
    OrderNotFound,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid passcode")]
    InvalidPasscode,
    #[error("total amount mismatch: access to orders is not allowed")]
    AmountMismatch,
    #[error("Conflict: {0}")]
    Conflict(String),
    /// Store or cache transport failure, message carried verbatim.
    #[error("{0}")]
    Upstream(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
