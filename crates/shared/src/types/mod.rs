//! Common types shared across crates.

pub mod pagination;

pub use pagination::{PageMeta, PageRequest, PageResponse};
