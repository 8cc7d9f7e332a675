use std::fmt;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};

use super::errors::{DomainError, RejectReason};

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub total: BigDecimal,
    pub created_at: DateTime<Utc>,
}

/// An order that passed validation and is ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub product_id: i32,
    pub quantity: i32,
    pub total: BigDecimal,
}

impl NewOrder {
    /// Prices a request against the snapshot it was validated with.
    pub fn priced(request: &OrderRequest, snapshot: &ProductSnapshot) -> Self {
        Self {
            product_id: request.product_id,
            quantity: request.quantity,
            total: BigDecimal::from(request.quantity) * &snapshot.price,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderRequest {
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderUpdate {
    pub id: i32,
    pub product_id: i32,
    pub quantity: i32,
}

impl OrderUpdate {
    pub fn ensure_targets(&self, path_id: i32) -> Result<(), DomainError> {
        if self.id != path_id {
            return Err(DomainError::InputMismatch {
                path_id,
                body_id: self.id,
            });
        }
        Ok(())
    }
}

/// Point-in-time view of a product owned by the Products service.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSnapshot {
    pub id: i32,
    pub price: BigDecimal,
    pub stock: i32,
}

impl ProductSnapshot {
    pub fn check_availability(&self, quantity: i32) -> Result<(), RejectReason> {
        if self.stock == 0 {
            return Err(RejectReason::OutOfStock);
        }
        if quantity > self.stock {
            return Err(RejectReason::QuantityNotAvailable);
        }
        if quantity <= 0 {
            return Err(RejectReason::NonPositiveQuantity);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailureRecord {
    pub product_id: i32,
    pub reason: RejectReason,
}

impl fmt::Display for FailureRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProductId {} - {}", self.product_id, self.reason)
    }
}

/// A stock decrement that did not reach the Products service after the
/// order it belongs to was already committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockUpdateFailure {
    pub order_id: i32,
    pub product_id: i32,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    Created {
        orders: Vec<Order>,
        stock_update_failures: Vec<StockUpdateFailure>,
    },
    Rejected(Vec<FailureRecord>),
}
