use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Order not found")]
    NotFound,
    #[error("Order id mismatch: path id {path_id} does not match body id {body_id}")]
    InputMismatch { path_id: i32, body_id: i32 },
    #[error("{0}")]
    Rejected(RejectReason),
    #[error("no orders provided")]
    EmptyBatch,
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Why a single order request failed validation against its product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    InvalidProductId,
    ProductNotFound,
    OutOfStock,
    QuantityNotAvailable,
    NonPositiveQuantity,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RejectReason::InvalidProductId => "invalid product id",
            RejectReason::ProductNotFound => "product not found",
            RejectReason::OutOfStock => "out of stock",
            RejectReason::QuantityNotAvailable => "quantity not available",
            RejectReason::NonPositiveQuantity => "quantity must be positive",
        };
        f.write_str(text)
    }
}

/// Failure talking to the Products service.
#[derive(Debug, Error)]
pub enum ProductLookupError {
    #[error("product service unreachable: {0}")]
    Unavailable(String),
    #[error("product service responded with status {0}")]
    Status(u16),
    #[error("malformed product payload: {0}")]
    Malformed(String),
}

impl ProductLookupError {
    /// Transport and status failures both mean the id could not be resolved;
    /// a readable response that is not a product means the product is missing.
    pub fn reject_reason(&self) -> RejectReason {
        match self {
            ProductLookupError::Unavailable(_) | ProductLookupError::Status(_) => {
                RejectReason::InvalidProductId
            }
            ProductLookupError::Malformed(_) => RejectReason::ProductNotFound,
        }
    }
}
