//! Point-of-sale routes.

use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{ApiError, AppState, middleware::auth::AuthUser};
use stockfarm_core::cart::{CartItem, CheckoutCart};
use stockfarm_db::{ProductRepository, StockRepository};
use stockfarm_shared::AppError;

/// Creates the sales router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/sales/checkout", post(checkout))
}

/// Checkout request: one line per product.
#[derive(Debug, Deserialize)]
struct CheckoutRequest {
    items: Vec<CartItem>,
}

/// POST /sales/checkout - Finalize a sale.
///
/// The whole cart is withdrawn FEFO in one transaction; any shortfall aborts
/// the entire sale with a 422 naming the product.
async fn checkout(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CheckoutRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let pharmacy_id = user.require_pharmacy()?;

    let cart = CheckoutCart::new(payload.items)?;

    let product_repo = ProductRepository::new((*state.db).clone());
    for item in cart.items() {
        product_repo
            .find_by_id(pharmacy_id, item.product_id)
            .await?
            .ok_or_else(|| {
                ApiError(AppError::NotFound(format!(
                    "produto {} não encontrado",
                    item.product_id
                )))
            })?;
    }

    let plans = StockRepository::new((*state.db).clone())
        .checkout(pharmacy_id, &cart)
        .await?;

    info!(
        pharmacy_id = %pharmacy_id,
        items = cart.items().len(),
        units = cart.total_units(),
        "sale finalized"
    );

    let lines: Vec<_> = cart
        .items()
        .iter()
        .zip(&plans)
        .map(|(item, plan)| {
            json!({
                "product_id": item.product_id,
                "quantity": item.quantity,
                "lots_consumed": plan.draws.len(),
            })
        })
        .collect();

    Ok(Json(json!({
        "message": "venda registrada",
        "total_units": cart.total_units(),
        "lines": lines,
    })))
}
