//! Authentication routes for register and login.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use serde_json::json;
use tracing::info;

use crate::{ApiError, AppState};
use stockfarm_core::auth::{hash_password, verify_password};
use stockfarm_db::UserRepository;
use stockfarm_shared::{AppError, LoginRequest, RegisterRequest, TokenResponse};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// POST /auth/register - Create a user account and return a token.
///
/// The account starts without a pharmacy; joining or creating one is a
/// separate call.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = payload.username.trim();
    let email = payload.email.trim();

    if username.is_empty() || email.is_empty() {
        return Err(ApiError(AppError::Validation(
            "username e email são obrigatórios".to_string(),
        )));
    }

    let user_repo = UserRepository::new((*state.db).clone());

    if user_repo.credentials_taken(username, email).await? {
        return Err(ApiError(AppError::Conflict(
            "username ou email já cadastrado".to_string(),
        )));
    }

    let password_hash = hash_password(&payload.password)?;
    let user = user_repo
        .create(username, email, &password_hash, None)
        .await?;

    info!(user_id = %user.id, "user registered");

    let token = state.jwt_service.generate_access_token(user.id, None)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "user": user,
            "token": TokenResponse::new(token, state.jwt_service.access_token_expires_in()),
        })),
    ))
}

/// POST /auth/login - Authenticate and return a pharmacy-scoped token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user_repo = UserRepository::new((*state.db).clone());

    fn invalid() -> ApiError {
        ApiError(AppError::Unauthorized(
            "usuário ou senha inválidos".to_string(),
        ))
    }

    let user = user_repo
        .find_by_username(&payload.username)
        .await?
        .ok_or_else(invalid)?;

    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "failed login attempt");
            return Err(invalid());
        }
        Err(e) => return Err(e.into()),
    }

    let token = state
        .jwt_service
        .generate_access_token(user.id, user.pharmacy_id)?;

    Ok(Json(json!({
        "user": user,
        "token": TokenResponse::new(token, state.jwt_service.access_token_expires_in()),
    })))
}
