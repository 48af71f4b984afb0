use ambit_core::ScopeError;
use thiserror::Error;

use crate::product::ProductId;

/// Rejected operations leave items and notifications exactly as they were.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CartError {
    #[error(transparent)]
    Scope(#[from] ScopeError),

    #[error("invalid product {id}: {reason}")]
    InvalidProduct { id: ProductId, reason: &'static str },

    #[error("discount must be between 0 and 100 percent, got {0}")]
    InvalidDiscount(f64),

    #[error("quantity {0} is out of range")]
    InvalidQuantity(i64),

    #[error("cart total or item count is too large to represent")]
    Overflow,
}
