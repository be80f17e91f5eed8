//! Core business logic for Stockfarm.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `stock` - Expiry ledger with FEFO withdrawal allocation
//! - `movement` - Append-only stock movement log types
//! - `demand` - Daily demand estimation from movement history
//! - `replenishment` - Safety stock, reorder point, and order suggestions
//! - `alerts` - Zero-stock, near-expiry, and excess-stock notices
//! - `report` - Report window resolution and display-date bucketing
//! - `cart` - Per-checkout cart value object
//! - `auth` - Password hashing

pub mod alerts;
pub mod auth;
pub mod cart;
pub mod demand;
pub mod movement;
pub mod replenishment;
pub mod report;
pub mod stock;
