//! Expiry-ledger routes: list, receive, and edit lots.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::{ApiError, AppState, middleware::auth::AuthUser};
use stockfarm_db::{ProductRepository, StockRepository};
use stockfarm_shared::AppError;

/// Creates the lot router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products/{id}/lots", get(list_lots).post(add_lot))
        .route("/lots/{id}", put(edit_lot))
}

/// Request body for receiving a lot.
#[derive(Debug, Deserialize)]
struct AddLotRequest {
    expiration_date: NaiveDate,
    quantity: i64,
}

/// Request body for overriding a lot. The quantity is always set; the
/// expiration date is only corrected when present.
#[derive(Debug, Deserialize)]
struct EditLotRequest {
    quantity: i64,
    expiration_date: Option<NaiveDate>,
}

/// Rejects products that do not belong to the caller's pharmacy.
async fn ensure_product(
    state: &AppState,
    pharmacy_id: Uuid,
    product_id: Uuid,
) -> Result<(), ApiError> {
    ProductRepository::new((*state.db).clone())
        .find_by_id(pharmacy_id, product_id)
        .await?
        .ok_or_else(|| {
            ApiError(AppError::NotFound(format!(
                "produto {product_id} não encontrado"
            )))
        })?;

    Ok(())
}

/// GET /products/{id}/lots - Lots in FEFO order.
async fn list_lots(
    State(state): State<AppState>,
    user: AuthUser,
    Path(product_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let pharmacy_id = user.require_pharmacy()?;
    ensure_product(&state, pharmacy_id, product_id).await?;

    let lots = StockRepository::new((*state.db).clone())
        .lots_for_product(product_id)
        .await?;

    Ok(Json(lots))
}

/// POST /products/{id}/lots - Receive a new lot. Never merged with existing
/// lots, even on matching expiration dates.
async fn add_lot(
    State(state): State<AppState>,
    user: AuthUser,
    Path(product_id): Path<Uuid>,
    Json(payload): Json<AddLotRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let pharmacy_id = user.require_pharmacy()?;
    ensure_product(&state, pharmacy_id, product_id).await?;

    let lot = StockRepository::new((*state.db).clone())
        .add_lot(
            pharmacy_id,
            product_id,
            payload.expiration_date,
            payload.quantity,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(lot)))
}

/// PUT /lots/{id} - Override a lot's remaining quantity and, optionally, its
/// expiration date. Writes one `edited` movement event with the signed
/// quantity delta; editing the quantity to zero deletes the lot.
async fn edit_lot(
    State(state): State<AppState>,
    user: AuthUser,
    Path(lot_id): Path<Uuid>,
    Json(payload): Json<EditLotRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let pharmacy_id = user.require_pharmacy()?;

    let updated = StockRepository::new((*state.db).clone())
        .edit_lot(
            pharmacy_id,
            lot_id,
            payload.quantity,
            payload.expiration_date,
        )
        .await?;

    match updated {
        Some(lot) => Ok(Json(json!({ "lot": lot, "deleted": false }))),
        None => Ok(Json(json!({ "lot": null, "deleted": true }))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_lot_request_accepts_date_correction() {
        let payload: EditLotRequest =
            serde_json::from_str(r#"{"quantity": 12, "expiration_date": "2026-11-30"}"#).unwrap();
        assert_eq!(payload.quantity, 12);
        assert_eq!(
            payload.expiration_date,
            NaiveDate::from_ymd_opt(2026, 11, 30)
        );
    }

    #[test]
    fn test_edit_lot_request_date_is_optional() {
        let payload: EditLotRequest = serde_json::from_str(r#"{"quantity": 3}"#).unwrap();
        assert_eq!(payload.quantity, 3);
        assert!(payload.expiration_date.is_none());
    }
}
