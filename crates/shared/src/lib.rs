//! Shared types, errors, and configuration for Stockfarm.
//!
//! This crate provides common types used across all other crates:
//! - Pagination types for list endpoints
//! - JWT claims and token service
//! - Application-wide error types
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::{Claims, LoginRequest, RegisterRequest, TokenResponse};
pub use config::{AppConfig, ReplenishmentConfig};
pub use error::AppError;
pub use jwt::{JwtConfig, JwtError, JwtService};
