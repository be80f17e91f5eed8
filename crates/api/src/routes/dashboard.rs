//! Dashboard route: live catalog aggregates plus alert notices.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};

use crate::{ApiError, AppState, middleware::auth::AuthUser};
use stockfarm_db::ReportRepository;

/// Creates the dashboard router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(dashboard))
}

/// GET /dashboard - Per-product ledger aggregates (live totals, nearest
/// expiration) and the zero-stock / near-expiry / excess notices.
async fn dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let pharmacy_id = user.require_pharmacy()?;

    let data = ReportRepository::new((*state.db).clone())
        .dashboard(pharmacy_id, &state.alert_params(), chrono::Utc::now())
        .await?;

    Ok(Json(data))
}
