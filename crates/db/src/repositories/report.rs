//! Report repository: replenishment report and dashboard assembly.
//!
//! Pulls ledger and movement data and feeds it through the pure core
//! components; no statistics are computed in SQL.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use serde::Serialize;
use uuid::Uuid;

use stockfarm_core::alerts::{Alert, AlertEmitter, AlertParams};
use stockfarm_core::demand::DemandEstimator;
use stockfarm_core::movement::{net_effect, MovementEvent};
use stockfarm_core::replenishment::{
    ReplenishmentCalculator, ReplenishmentParams, ReplenishmentResult,
};
use stockfarm_core::report::{display_date, Periodo, ReportWindow, WindowSelection};
use stockfarm_core::stock::{ExpiryLot, StockService};

use super::movement::MovementRepository;
use crate::entities::{products, stock_lots};

/// One replenishment report line: a product with in-window sales.
#[derive(Debug, Clone, Serialize)]
pub struct ReplenishmentReportEntry {
    pub product_id: Uuid,
    pub product_name: String,
    #[serde(flatten)]
    pub result: ReplenishmentResult,
}

/// The full replenishment report for one pharmacy and window.
#[derive(Debug, Clone, Serialize)]
pub struct ReplenishmentReport {
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    /// Set when an invalid explicit range was replaced by the 7-day default.
    pub fallback_applied: bool,
    pub entries: Vec<ReplenishmentReportEntry>,
}

/// Live catalog overview for the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct ProductOverview {
    pub product_id: Uuid,
    pub name: String,
    pub codigo_barras: String,
    /// Live ledger aggregate (sum of lot remainders).
    pub total_quantity: i64,
    /// Soonest expiration among non-empty lots.
    pub nearest_expiration: Option<chrono::NaiveDate>,
}

/// Dashboard payload: per-product aggregates plus alert notices.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub products: Vec<ProductOverview>,
    pub alerts: Vec<Alert>,
}

/// Report repository, always pharmacy-scoped.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the replenishment report: one entry per product with at least
    /// one in-window sale, ordered by product name. Products without sales
    /// are absent, not zero-filled.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn replenishment(
        &self,
        pharmacy_id: Uuid,
        selection: &WindowSelection,
        params: &ReplenishmentParams,
        now: DateTime<Utc>,
    ) -> Result<ReplenishmentReport, DbErr> {
        let window = ReportWindow::resolve(selection, now);
        let today = display_date(now);

        let catalog = products::Entity::find()
            .filter(products::Column::PharmacyId.eq(pharmacy_id))
            .order_by_asc(products::Column::Name)
            .all(&self.db)
            .await?;

        let events = self.events_in_window(pharmacy_id, &window).await?;
        let by_product = group_by_product(events);

        let lots = self.lots_for_catalog(&catalog).await?;

        let mut entries = Vec::new();
        for product in &catalog {
            let Some(product_events) = by_product.get(&product.id) else {
                continue;
            };
            let Some(estimate) = DemandEstimator::estimate(product_events, &window) else {
                continue;
            };

            let product_lots: Vec<ExpiryLot> = lots
                .iter()
                .filter(|l| l.product_id == product.id)
                .cloned()
                .collect();
            let current_stock = net_effect(product_events);

            let result = ReplenishmentCalculator::calculate(
                product.id,
                &estimate,
                &product_lots,
                current_stock,
                today,
                params,
            );

            entries.push(ReplenishmentReportEntry {
                product_id: product.id,
                product_name: product.name.clone(),
                result,
            });
        }

        Ok(ReplenishmentReport {
            window_start: window.start,
            window_end: window.end,
            fallback_applied: window.fallback_applied,
            entries,
        })
    }

    /// Assembles the dashboard: live aggregates for every product plus the
    /// alert notices (zero stock, near expiry, excess over the trailing
    /// week).
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn dashboard(
        &self,
        pharmacy_id: Uuid,
        params: &AlertParams,
        now: DateTime<Utc>,
    ) -> Result<DashboardData, DbErr> {
        let today = display_date(now);

        let catalog = products::Entity::find()
            .filter(products::Column::PharmacyId.eq(pharmacy_id))
            .order_by_asc(products::Column::Name)
            .all(&self.db)
            .await?;

        let lots = self.lots_for_catalog(&catalog).await?;

        let week = ReportWindow::from_preset(Periodo::Semana, now);
        let recent = self.events_in_window(pharmacy_id, &week).await?;
        let recent_by_product = group_by_product(recent);

        let mut overviews = Vec::with_capacity(catalog.len());
        let mut alerts = Vec::new();

        for product in &catalog {
            let product_lots: Vec<ExpiryLot> = lots
                .iter()
                .filter(|l| l.product_id == product.id)
                .cloned()
                .collect();

            let aggregate = StockService::aggregate(product.id, &product_lots);
            overviews.push(ProductOverview {
                product_id: product.id,
                name: product.name.clone(),
                codigo_barras: product.codigo_barras.clone(),
                total_quantity: aggregate.total_quantity,
                nearest_expiration: aggregate.nearest_expiration,
            });

            let product_events = recent_by_product
                .get(&product.id)
                .map_or(&[][..], Vec::as_slice);
            alerts.extend(AlertEmitter::emit(
                product.id,
                &product.name,
                &product_lots,
                product_events,
                params,
                now,
                today,
            ));
        }

        Ok(DashboardData {
            products: overviews,
            alerts,
        })
    }

    async fn events_in_window(
        &self,
        pharmacy_id: Uuid,
        window: &ReportWindow,
    ) -> Result<Vec<MovementEvent>, DbErr> {
        MovementRepository::new(self.db.clone())
            .events_in_window(pharmacy_id, window)
            .await
    }

    async fn lots_for_catalog(
        &self,
        catalog: &[products::Model],
    ) -> Result<Vec<ExpiryLot>, DbErr> {
        let ids: Vec<Uuid> = catalog.iter().map(|p| p.id).collect();

        let rows = stock_lots::Entity::find()
            .filter(stock_lots::Column::ProductId.is_in(ids))
            .all(&self.db)
            .await?;

        Ok(rows.iter().map(stock_lots::Model::to_expiry_lot).collect())
    }
}

fn group_by_product(events: Vec<MovementEvent>) -> BTreeMap<Uuid, Vec<MovementEvent>> {
    let mut map: BTreeMap<Uuid, Vec<MovementEvent>> = BTreeMap::new();
    for event in events {
        map.entry(event.product_id).or_default().push(event);
    }
    map
}
