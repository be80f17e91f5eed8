//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application. All domain decisions (FEFO planning, demand statistics,
//! alerts) stay in `stockfarm-core`; repositories only move data.

pub mod movement;
pub mod pharmacy;
pub mod product;
pub mod report;
pub mod stock;
pub mod user;

pub use movement::{
    DELETED_PRODUCT_PLACEHOLDER, MovementHistoryEntry, MovementRepository, append_event,
};
pub use pharmacy::{CreatePharmacyInput, PharmacyRepository};
pub use product::{
    CreateProductInput, ProductError, ProductFilter, ProductRepository, UpdateProductInput,
};
pub use report::{
    DashboardData, ProductOverview, ReplenishmentReport, ReplenishmentReportEntry,
    ReportRepository,
};
pub use stock::{StockRepository, StockWriteError};
pub use user::UserRepository;
