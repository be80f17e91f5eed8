//! Pharmacy management routes: create, join, inspect.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::{ApiError, AppState, middleware::auth::AuthUser};
use stockfarm_db::{
    PharmacyRepository, UserRepository, repositories::CreatePharmacyInput,
};
use stockfarm_shared::{AppError, TokenResponse};

/// Creates the pharmacy router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pharmacies", post(create_pharmacy))
        .route("/pharmacies/join", post(join_pharmacy))
        .route("/pharmacies/me", get(current_pharmacy))
}

/// Request body for creating a pharmacy.
#[derive(Debug, Deserialize)]
struct CreatePharmacyRequest {
    name: String,
    address: Option<String>,
    phone: Option<String>,
    cep: Option<String>,
    cnpj: Option<String>,
}

/// Request body for joining an existing pharmacy by name.
#[derive(Debug, Deserialize)]
struct JoinPharmacyRequest {
    name: String,
}

/// POST /pharmacies - Create a pharmacy and attach the current user to it.
///
/// Returns a fresh token carrying the new pharmacy claim.
async fn create_pharmacy(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreatePharmacyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError(AppError::Validation(
            "nome da farmácia é obrigatório".to_string(),
        )));
    }

    let pharmacy_repo = PharmacyRepository::new((*state.db).clone());

    if pharmacy_repo.name_exists(&name).await? {
        return Err(ApiError(AppError::Conflict(format!(
            "farmácia '{name}' já existe"
        ))));
    }

    let pharmacy = pharmacy_repo
        .create(CreatePharmacyInput {
            name,
            address: payload.address,
            phone: payload.phone,
            cep: payload.cep,
            cnpj: payload.cnpj,
        })
        .await?;

    let user_repo = UserRepository::new((*state.db).clone());
    user_repo
        .assign_pharmacy(user.user_id(), pharmacy.id)
        .await?
        .ok_or_else(|| ApiError(AppError::NotFound("usuário não encontrado".to_string())))?;

    info!(pharmacy_id = %pharmacy.id, user_id = %user.user_id(), "pharmacy created");

    let token = state
        .jwt_service
        .generate_access_token(user.user_id(), Some(pharmacy.id))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "pharmacy": pharmacy,
            "token": TokenResponse::new(token, state.jwt_service.access_token_expires_in()),
        })),
    ))
}

/// POST /pharmacies/join - Attach the current user to an existing pharmacy.
async fn join_pharmacy(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<JoinPharmacyRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let pharmacy_repo = PharmacyRepository::new((*state.db).clone());

    let pharmacy = pharmacy_repo
        .find_by_name(payload.name.trim())
        .await?
        .ok_or_else(|| {
            ApiError(AppError::NotFound(format!(
                "farmácia '{}' não encontrada",
                payload.name.trim()
            )))
        })?;

    let user_repo = UserRepository::new((*state.db).clone());
    user_repo
        .assign_pharmacy(user.user_id(), pharmacy.id)
        .await?
        .ok_or_else(|| ApiError(AppError::NotFound("usuário não encontrado".to_string())))?;

    let token = state
        .jwt_service
        .generate_access_token(user.user_id(), Some(pharmacy.id))?;

    Ok(Json(json!({
        "pharmacy": pharmacy,
        "token": TokenResponse::new(token, state.jwt_service.access_token_expires_in()),
    })))
}

/// GET /pharmacies/me - Details of the pharmacy in the token.
async fn current_pharmacy(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let pharmacy_id = user.require_pharmacy()?;

    let pharmacy = PharmacyRepository::new((*state.db).clone())
        .find_by_id(pharmacy_id)
        .await?
        .ok_or_else(|| ApiError(AppError::NotFound("farmácia não encontrada".to_string())))?;

    Ok(Json(pharmacy))
}
