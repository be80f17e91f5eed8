//! Reporting routes: movement history and the replenishment report.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
};
use serde_json::json;

use crate::{ApiError, AppState, middleware::auth::AuthUser};
use stockfarm_core::report::WindowSelection;
use stockfarm_db::{MovementRepository, ReportRepository};
use stockfarm_shared::types::PageRequest;

/// User-facing notice shown when an invalid window fell back to the default.
const WINDOW_FALLBACK_NOTICE: &str =
    "período inválido; exibindo os últimos 7 dias";

/// Creates the reports router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reports/movements", get(movement_history))
        .route("/reports/replenishment", get(replenishment_report))
}

/// GET /reports/movements?page=&per_page= - Paginated movement history,
/// newest first. Deleted products appear under a placeholder name.
async fn movement_history(
    State(state): State<AppState>,
    user: AuthUser,
    Query(page): Query<PageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let pharmacy_id = user.require_pharmacy()?;

    let history = MovementRepository::new((*state.db).clone())
        .history(pharmacy_id, &page)
        .await?;

    Ok(Json(history))
}

/// GET /reports/replenishment?inicio=&fim=&periodo= - Replenishment report.
///
/// Explicit dates win over the preset; malformed or inverted ranges fall
/// back to the 7-day default and the response carries a notice instead of
/// failing.
async fn replenishment_report(
    State(state): State<AppState>,
    user: AuthUser,
    Query(selection): Query<WindowSelection>,
) -> Result<impl IntoResponse, ApiError> {
    let pharmacy_id = user.require_pharmacy()?;

    let report = ReportRepository::new((*state.db).clone())
        .replenishment(
            pharmacy_id,
            &selection,
            &state.replenishment_params(),
            chrono::Utc::now(),
        )
        .await?;

    let aviso = report.fallback_applied.then_some(WINDOW_FALLBACK_NOTICE);

    Ok(Json(json!({
        "window_start": report.window_start,
        "window_end": report.window_end,
        "aviso": aviso,
        "entries": report.entries,
    })))
}
