//! Error types for the expiry ledger.

use thiserror::Error;

/// Errors that can occur in expiry ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StockError {
    /// The aggregate available quantity across all lots is less than the
    /// requested withdrawal. Detected before any lot is mutated.
    #[error("insufficient stock: requested {requested}, available {available}")]
    Insufficient {
        /// Quantity the caller asked for.
        requested: i64,
        /// Total quantity available across all lots.
        available: i64,
    },

    /// A withdrawal or lot quantity must be strictly positive.
    #[error("quantity must be positive, got {0}")]
    NonPositiveQuantity(i64),
}
