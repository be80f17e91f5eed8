//! Expiry ledger with FEFO (first-expiring-first-out) withdrawal allocation.

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::StockError;
pub use service::StockService;
pub use types::{ExpiryLot, LotDraw, ProductAggregate, WithdrawalPlan};
