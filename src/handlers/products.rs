// src/handlers/products.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    common::{error::AppError, pagination::Page},
    config::AppState,
    handlers::today,
    middleware::{auth::AuthenticatedUser, json::AppJson},
    models::product::{Product, ProductPayload, ProductQuery, ProductView},
};

// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Produk milik pengguna, urut nama, dengan status stok dan kadaluarsa"),
        (status = 401, description = "Token tidak valid")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Page<ProductView<Product>>>, AppError> {
    let page = app_state
        .product_service
        .list(user.id, &query, today())
        .await?;
    Ok(Json(page))
}

// GET /api/products/{id}
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "ID produk")),
    responses(
        (status = 200, body = Product),
        (status = 404, description = "Produk tidak ditemukan")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<Product>, AppError> {
    let product = app_state.product_service.get(user.id, id).await?;
    Ok(Json(product))
}

// POST /api/products
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = ProductPayload,
    responses(
        (status = 201, body = Product),
        (status = 400, description = "Isian tidak valid")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AppJson(payload): AppJson<ProductPayload>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    payload.validate()?;
    let product = app_state.product_service.create(user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

// PUT /api/products/{id}
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "ID produk")),
    request_body = ProductPayload,
    responses(
        (status = 200, body = Product),
        (status = 400, description = "Isian tidak valid"),
        (status = 404, description = "Produk tidak ditemukan")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<ProductPayload>,
) -> Result<Json<Product>, AppError> {
    payload.validate()?;
    let product = app_state.product_service.update(user.id, id, payload).await?;
    Ok(Json(product))
}

// DELETE /api/products/{id}
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "ID produk")),
    responses(
        (status = 204, description = "Produk dihapus"),
        (status = 404, description = "Produk tidak ditemukan")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    app_state.product_service.delete(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
