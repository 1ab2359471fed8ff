// src/handlers/suggestions.rs

use axum::{extract::State, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::today,
    middleware::{auth::AuthenticatedUser, json::AppJson},
    models::suggestion::{
        ApproveSuggestionPayload, ApproveSuggestionResponse, SuggestionStatsResponse,
        SuggestionsResponse,
    },
};

// GET /api/suggestions
#[utoipa::path(
    get,
    path = "/api/suggestions",
    tag = "Suggestions",
    responses(
        (status = 200, description = "Daftar belanja yang disarankan", body = SuggestionsResponse),
        (status = 401, description = "Token tidak valid")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_suggestions(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<SuggestionsResponse>, AppError> {
    let report = app_state
        .suggestion_service
        .get_suggestions(user.id, today())
        .await?;

    Ok(Json(SuggestionsResponse {
        success: true,
        suggestions: report.suggestions,
        stats: report.stats,
    }))
}

// GET /api/suggestions/stats
#[utoipa::path(
    get,
    path = "/api/suggestions/stats",
    tag = "Suggestions",
    responses(
        (status = 200, description = "Jumlah saran per kategori", body = SuggestionStatsResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_suggestion_stats(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<SuggestionStatsResponse>, AppError> {
    let report = app_state
        .suggestion_service
        .get_suggestions(user.id, today())
        .await?;

    Ok(Json(SuggestionStatsResponse { success: true, stats: report.stats }))
}

// POST /api/suggestions/approve
#[utoipa::path(
    post,
    path = "/api/suggestions/approve",
    tag = "Suggestions",
    request_body = ApproveSuggestionPayload,
    responses(
        (status = 200, description = "Saran diterapkan ke produk", body = ApproveSuggestionResponse),
        (status = 400, description = "productId atau type tidak valid"),
        (status = 404, description = "Produk tidak ditemukan")
    ),
    security(("api_jwt" = []))
)]
pub async fn approve_suggestion(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AppJson(payload): AppJson<ApproveSuggestionPayload>,
) -> Result<Json<ApproveSuggestionResponse>, AppError> {
    let product = app_state.suggestion_service.approve(user.id, payload).await?;

    Ok(Json(ApproveSuggestionResponse {
        success: true,
        message: format!("Saran untuk {} berhasil diterapkan.", product.name),
        product,
    }))
}
