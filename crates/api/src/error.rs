//! Error-to-response mapping for handlers.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde_json::json;

use stockfarm_core::auth::PasswordError;
use stockfarm_core::cart::CartError;
use stockfarm_core::stock::StockError;
use stockfarm_db::repositories::{ProductError, StockWriteError};
use stockfarm_shared::AppError;

/// Response-producing wrapper around [`AppError`].
///
/// Handlers return `Result<_, ApiError>` and rely on the `From` conversions
/// below; every error surfaces as `{error, message}` JSON with the shared
/// status-code table.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": self.0.to_string(),
            })),
        )
            .into_response()
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        Self(AppError::Database(err.to_string()))
    }
}

impl From<ProductError> for ApiError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => {
                Self(AppError::NotFound(format!("produto {id} não encontrado")))
            }
            ProductError::Db(e) => Self(AppError::Database(e.to_string())),
        }
    }
}

impl From<StockWriteError> for ApiError {
    fn from(err: StockWriteError) -> Self {
        match err {
            StockWriteError::Stock {
                product_id,
                source: StockError::Insufficient {
                    requested,
                    available,
                },
            } => Self(AppError::BusinessRule(format!(
                "estoque insuficiente para o produto {product_id}: \
                 solicitado {requested}, disponível {available}"
            ))),
            StockWriteError::Stock {
                source: StockError::NonPositiveQuantity(qty),
                ..
            } => Self(AppError::Validation(format!("quantidade inválida: {qty}"))),
            StockWriteError::LotNotFound(id) => {
                Self(AppError::NotFound(format!("lote {id} não encontrado")))
            }
            StockWriteError::Db(e) => Self(AppError::Database(e.to_string())),
        }
    }
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        Self(AppError::Validation(err.to_string()))
    }
}

impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        match err {
            PasswordError::TooShort => Self(AppError::Validation(err.to_string())),
            _ => Self(AppError::Internal(err.to_string())),
        }
    }
}

impl From<stockfarm_shared::JwtError> for ApiError {
    fn from(err: stockfarm_shared::JwtError) -> Self {
        Self(AppError::Internal(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_maps_to_business_rule() {
        let err: ApiError = StockWriteError::Stock {
            product_id: uuid::Uuid::new_v4(),
            source: StockError::Insufficient {
                requested: 7,
                available: 3,
            },
        }
        .into();

        assert_eq!(err.0.status_code(), 422);
        assert_eq!(err.0.error_code(), "BUSINESS_RULE_VIOLATION");
    }

    #[test]
    fn test_cart_error_maps_to_validation() {
        let err: ApiError = CartError::Empty.into();
        assert_eq!(err.0.status_code(), 400);
    }

    #[test]
    fn test_lot_not_found_maps_to_404() {
        let err: ApiError = StockWriteError::LotNotFound(uuid::Uuid::new_v4()).into();
        assert_eq!(err.0.status_code(), 404);
    }
}
