//! Movement repository: append-only ledger reads and writes.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde::Serialize;
use uuid::Uuid;

use stockfarm_core::movement::{MovementEvent, MovementKind};
use stockfarm_core::report::ReportWindow;
use stockfarm_shared::types::{PageRequest, PageResponse};

use crate::entities::{movement_events, products};

/// Product name shown when the product row no longer exists.
pub const DELETED_PRODUCT_PLACEHOLDER: &str = "Produto Excluído";

/// One row of the paginated movement history, joined with the product
/// catalog.
#[derive(Debug, Clone, Serialize)]
pub struct MovementHistoryEntry {
    pub id: Uuid,
    pub product_id: Uuid,
    /// Catalog name, or [`DELETED_PRODUCT_PLACEHOLDER`] when the product was
    /// deleted after the movement.
    pub product_name: String,
    pub codigo_barras: Option<String>,
    pub kind: MovementKind,
    pub quantity: i64,
    pub signed_effect: i64,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Appends one movement event inside the caller's transaction.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub async fn append_event<C: ConnectionTrait>(
    conn: &C,
    pharmacy_id: Uuid,
    event: &MovementEvent,
) -> Result<(), DbErr> {
    let row = movement_events::ActiveModel {
        id: Set(Uuid::now_v7()),
        pharmacy_id: Set(pharmacy_id),
        product_id: Set(event.product_id),
        kind: Set(event.kind.into()),
        quantity: Set(event.quantity),
        signed_effect: Set(event.signed_effect),
        timestamp: Set(event.timestamp.into()),
    };

    row.insert(conn).await?;

    Ok(())
}

/// Movement repository for ledger reads, always pharmacy-scoped.
#[derive(Debug, Clone)]
pub struct MovementRepository {
    db: DatabaseConnection,
}

impl MovementRepository {
    /// Creates a new movement repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// All of a pharmacy's events inside the window (inclusive bounds), in
    /// timestamp order. Feeds the demand estimator and the replenishment
    /// report.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn events_in_window(
        &self,
        pharmacy_id: Uuid,
        window: &ReportWindow,
    ) -> Result<Vec<MovementEvent>, DbErr> {
        let rows = movement_events::Entity::find()
            .filter(movement_events::Column::PharmacyId.eq(pharmacy_id))
            .filter(movement_events::Column::Timestamp.gte(window.start))
            .filter(movement_events::Column::Timestamp.lte(window.end))
            .order_by_asc(movement_events::Column::Timestamp)
            .all(&self.db)
            .await?;

        Ok(rows.iter().map(movement_events::Model::to_core_event).collect())
    }

    /// Paginated movement history (newest first) with product names joined
    /// in. Events of deleted products keep their rows and get a placeholder
    /// name.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn history(
        &self,
        pharmacy_id: Uuid,
        page: &PageRequest,
    ) -> Result<PageResponse<MovementHistoryEntry>, DbErr> {
        let base = movement_events::Entity::find()
            .filter(movement_events::Column::PharmacyId.eq(pharmacy_id));

        let total = base.clone().count(&self.db).await?;

        let rows = base
            .order_by_desc(movement_events::Column::Timestamp)
            .order_by_desc(movement_events::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        let product_ids: Vec<Uuid> = {
            let mut ids: Vec<Uuid> = rows.iter().map(|r| r.product_id).collect();
            ids.sort_unstable();
            ids.dedup();
            ids
        };

        let catalog: Vec<products::Model> = products::Entity::find()
            .filter(products::Column::Id.is_in(product_ids))
            .all(&self.db)
            .await?;

        let entries = rows
            .into_iter()
            .map(|row| {
                let product = catalog.iter().find(|p| p.id == row.product_id);
                MovementHistoryEntry {
                    id: row.id,
                    product_id: row.product_id,
                    product_name: product.map_or_else(
                        || DELETED_PRODUCT_PLACEHOLDER.to_string(),
                        |p| p.name.clone(),
                    ),
                    codigo_barras: product.map(|p| p.codigo_barras.clone()),
                    kind: row.kind.clone().into(),
                    quantity: row.quantity,
                    signed_effect: row.signed_effect,
                    timestamp: row.timestamp.to_utc(),
                }
            })
            .collect();

        Ok(PageResponse::new(entries, page, total))
    }
}
