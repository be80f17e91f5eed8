//! Append-only stock movement log types.

pub mod types;

pub use types::{MovementEvent, MovementKind, net_effect};
