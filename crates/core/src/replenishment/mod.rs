//! Safety stock, reorder point, and order quantity suggestions.

pub mod service;
pub mod types;

pub use service::ReplenishmentCalculator;
pub use types::{ReplenishmentParams, ReplenishmentResult};
