//! Product catalog routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use crate::{ApiError, AppState, middleware::auth::AuthUser};
use stockfarm_db::{
    ProductRepository,
    repositories::{CreateProductInput, ProductFilter, UpdateProductInput},
};
use stockfarm_shared::AppError;

/// Creates the product router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

/// Catalog search query parameters. All optional, combined with AND.
#[derive(Debug, Default, Deserialize)]
struct ProductFilterQuery {
    name: Option<String>,
    genero: Option<String>,
    tipo: Option<String>,
    manufacturer: Option<String>,
    codigo_barras: Option<String>,
}

impl From<ProductFilterQuery> for ProductFilter {
    fn from(query: ProductFilterQuery) -> Self {
        Self {
            name: query.name,
            genero: query.genero,
            tipo: query.tipo,
            manufacturer: query.manufacturer,
            codigo_barras: query.codigo_barras,
        }
    }
}

/// Request body for creating a product.
#[derive(Debug, Deserialize)]
struct CreateProductRequest {
    name: String,
    genero: Option<String>,
    tipo: Option<String>,
    grupo: Option<String>,
    numeracao_original: Option<String>,
    #[serde(default = "default_quantidade_embalagem")]
    quantidade_embalagem: i32,
    manufacturer: String,
    supplier: String,
    preco_compra: Decimal,
    preco_venda: Decimal,
    codigo_barras: String,
}

fn default_quantidade_embalagem() -> i32 {
    1
}

/// Request body for updating a product; absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
struct UpdateProductRequest {
    name: Option<String>,
    genero: Option<String>,
    tipo: Option<String>,
    grupo: Option<String>,
    numeracao_original: Option<String>,
    quantidade_embalagem: Option<i32>,
    manufacturer: Option<String>,
    supplier: Option<String>,
    preco_compra: Option<Decimal>,
    preco_venda: Option<Decimal>,
    codigo_barras: Option<String>,
}

/// GET /products - List the pharmacy's catalog with optional filters.
async fn list_products(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ProductFilterQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let pharmacy_id = user.require_pharmacy()?;

    let products = ProductRepository::new((*state.db).clone())
        .list(pharmacy_id, &query.into())
        .await?;

    Ok(Json(products))
}

/// POST /products - Create a product; manufacturer/supplier resolved by
/// name, created on first use.
async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let pharmacy_id = user.require_pharmacy()?;

    if payload.name.trim().is_empty() {
        return Err(ApiError(AppError::Validation(
            "nome do produto é obrigatório".to_string(),
        )));
    }
    if payload.quantidade_embalagem <= 0 {
        return Err(ApiError(AppError::Validation(
            "quantidade por embalagem deve ser positiva".to_string(),
        )));
    }

    let product = ProductRepository::new((*state.db).clone())
        .create(
            pharmacy_id,
            CreateProductInput {
                name: payload.name.trim().to_string(),
                genero: payload.genero,
                tipo: payload.tipo,
                grupo: payload.grupo,
                numeracao_original: payload.numeracao_original,
                quantidade_embalagem: payload.quantidade_embalagem,
                manufacturer: payload.manufacturer,
                supplier: payload.supplier,
                preco_compra: payload.preco_compra,
                preco_venda: payload.preco_venda,
                codigo_barras: payload.codigo_barras,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /products/{id} - Fetch one product.
async fn get_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let pharmacy_id = user.require_pharmacy()?;

    let product = ProductRepository::new((*state.db).clone())
        .find_by_id(pharmacy_id, id)
        .await?
        .ok_or_else(|| ApiError(AppError::NotFound(format!("produto {id} não encontrado"))))?;

    Ok(Json(product))
}

/// PUT /products/{id} - Partial update.
async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let pharmacy_id = user.require_pharmacy()?;

    if let Some(qty) = payload.quantidade_embalagem {
        if qty <= 0 {
            return Err(ApiError(AppError::Validation(
                "quantidade por embalagem deve ser positiva".to_string(),
            )));
        }
    }

    let product = ProductRepository::new((*state.db).clone())
        .update(
            pharmacy_id,
            id,
            UpdateProductInput {
                name: payload.name,
                genero: payload.genero,
                tipo: payload.tipo,
                grupo: payload.grupo,
                numeracao_original: payload.numeracao_original,
                quantidade_embalagem: payload.quantidade_embalagem,
                manufacturer: payload.manufacturer,
                supplier: payload.supplier,
                preco_compra: payload.preco_compra,
                preco_venda: payload.preco_venda,
                codigo_barras: payload.codigo_barras,
            },
        )
        .await?;

    Ok(Json(product))
}

/// DELETE /products/{id} - Remove a product. Lots cascade; movement history
/// stays and is shown with a placeholder name.
async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let pharmacy_id = user.require_pharmacy()?;

    ProductRepository::new((*state.db).clone())
        .delete(pharmacy_id, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
