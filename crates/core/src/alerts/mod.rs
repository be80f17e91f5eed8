//! Zero-stock, near-expiry, and excess-stock notices.

pub mod emitter;

pub use emitter::{Alert, AlertEmitter, AlertKind, AlertParams, Severity};
