// src/handlers/admin.rs
//
// Every handler here takes `RequireRole<AdminRole>`, so non-admins get 403
// before any work is done.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, Utc};

use crate::{
    common::{error::AppError, pagination::Page, thresholds::DEFAULT_LOG_RETENTION_DAYS},
    config::AppState,
    handlers::{record_activity, today},
    middleware::{
        json::AppJson,
        rbac::{AdminRole, RequireRole},
    },
    models::{
        activity::{
            ActivityAction, ActivityLogEntry, ActivityQuery, NewActivity, PurgeQuery,
            PurgeResponse,
        },
        auth::{Role, UpdateUserPayload, User, UserQuery},
        dashboard::AdminOverview,
        product::{ProductQuery, ProductView, ProductWithOwner},
    },
    services::stock::InventoryCounts,
};

// GET /api/admin/overview
#[utoipa::path(
    get,
    path = "/api/admin/overview",
    tag = "Admin",
    responses(
        (status = 200, body = AdminOverview),
        (status = 403, description = "Bukan admin")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_overview(
    State(app_state): State<AppState>,
    _admin: RequireRole<AdminRole>,
) -> Result<Json<AdminOverview>, AppError> {
    let users = app_state.user_repo.counts().await?;
    let products = app_state.product_service.all_products().await?;

    Ok(Json(AdminOverview {
        users,
        inventory: InventoryCounts::tally(&products, today()),
    }))
}

// ---
// Users
// ---

// GET /api/admin/users
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "Admin",
    params(UserQuery),
    responses((status = 200, description = "Daftar pengguna, terbaru dulu")),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    _admin: RequireRole<AdminRole>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Page<User>>, AppError> {
    let search = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty());
    let page = app_state
        .user_repo
        .list_users(search, query.page_params())
        .await?;
    Ok(Json(page))
}

// PATCH /api/admin/users/{id}
#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}",
    tag = "Admin",
    params(("id" = i64, Path, description = "ID pengguna")),
    request_body = UpdateUserPayload,
    responses(
        (status = 200, body = User),
        (status = 400, description = "Admin tidak dapat menurunkan atau menonaktifkan dirinya sendiri"),
        (status = 404, description = "Pengguna tidak ditemukan")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    RequireRole(admin, _): RequireRole<AdminRole>,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<UpdateUserPayload>,
) -> Result<Json<User>, AppError> {
    let demotes_self = payload.role.is_some_and(|role| role != Role::Admin);
    let disables_self = payload.is_active == Some(false);
    if id == admin.id && (demotes_self || disables_self) {
        return Err(AppError::BadRequest(
            "Anda tidak dapat menurunkan peran atau menonaktifkan akun sendiri.".to_string(),
        ));
    }

    let user = app_state
        .user_repo
        .update_user(id, payload.role, payload.is_active)
        .await?
        .ok_or(AppError::UserNotFound)?;

    tracing::info!(admin_id = admin.id, user_id = user.id, "user updated by admin");
    record_activity(
        &app_state,
        NewActivity::new(
            Some(admin.id),
            ActivityAction::AdminUserUpdate,
            format!("Admin memperbarui pengguna {}", user.email),
        )
        .with_entity(user.id),
    )
    .await;

    Ok(Json(user))
}

// DELETE /api/admin/users/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    tag = "Admin",
    params(("id" = i64, Path, description = "ID pengguna")),
    responses(
        (status = 204, description = "Pengguna dihapus beserta datanya"),
        (status = 400, description = "Admin tidak dapat menghapus dirinya sendiri"),
        (status = 404, description = "Pengguna tidak ditemukan")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    RequireRole(admin, _): RequireRole<AdminRole>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if id == admin.id {
        return Err(AppError::BadRequest(
            "Anda tidak dapat menghapus akun sendiri.".to_string(),
        ));
    }

    if !app_state.user_repo.delete_user(id).await? {
        return Err(AppError::UserNotFound);
    }

    tracing::info!(admin_id = admin.id, user_id = id, "user deleted by admin");
    record_activity(
        &app_state,
        NewActivity::new(
            Some(admin.id),
            ActivityAction::AdminUserDelete,
            format!("Admin menghapus pengguna #{}", id),
        )
        .with_entity(id),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}

// ---
// Products
// ---

// GET /api/admin/products
#[utoipa::path(
    get,
    path = "/api/admin/products",
    tag = "Admin",
    params(ProductQuery),
    responses((status = 200, description = "Produk semua pengguna beserta pemiliknya")),
    security(("api_jwt" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    _admin: RequireRole<AdminRole>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Page<ProductView<ProductWithOwner>>>, AppError> {
    let page = app_state.product_service.list_all(&query, today()).await?;
    Ok(Json(page))
}

// DELETE /api/admin/products/{id}
#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    tag = "Admin",
    params(("id" = i64, Path, description = "ID produk")),
    responses(
        (status = 204, description = "Produk dihapus"),
        (status = 404, description = "Produk tidak ditemukan")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    RequireRole(admin, _): RequireRole<AdminRole>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    app_state.product_service.delete_any(admin.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---
// Activity logs
// ---

// GET /api/admin/activity-logs
#[utoipa::path(
    get,
    path = "/api/admin/activity-logs",
    tag = "Admin",
    params(ActivityQuery),
    responses((status = 200, description = "Log aktivitas, terbaru dulu")),
    security(("api_jwt" = []))
)]
pub async fn list_activity_logs(
    State(app_state): State<AppState>,
    _admin: RequireRole<AdminRole>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<Page<ActivityLogEntry>>, AppError> {
    let page = app_state
        .activity
        .list(query.user_id, query.page_params())
        .await?;
    Ok(Json(page))
}

// DELETE /api/admin/activity-logs
#[utoipa::path(
    delete,
    path = "/api/admin/activity-logs",
    tag = "Admin",
    params(PurgeQuery),
    responses(
        (status = 200, body = PurgeResponse),
        (status = 400, description = "older_than_days di luar rentang")
    ),
    security(("api_jwt" = []))
)]
pub async fn purge_activity_logs(
    State(app_state): State<AppState>,
    RequireRole(admin, _): RequireRole<AdminRole>,
    Query(query): Query<PurgeQuery>,
) -> Result<Json<PurgeResponse>, AppError> {
    let days = query.older_than_days.unwrap_or(DEFAULT_LOG_RETENTION_DAYS);
    if days < 1 {
        return Err(AppError::BadRequest(
            "older_than_days harus minimal 1.".to_string(),
        ));
    }

    let cutoff = Duration::try_days(days)
        .and_then(|age| Utc::now().checked_sub_signed(age))
        .ok_or_else(|| AppError::BadRequest("older_than_days terlalu besar.".to_string()))?;
    let deleted = app_state.activity.purge_before(cutoff).await?;

    tracing::info!(admin_id = admin.id, days, deleted, "activity logs purged");
    record_activity(
        &app_state,
        NewActivity::new(
            Some(admin.id),
            ActivityAction::AdminLogPurge,
            format!("Admin menghapus {} log aktivitas lebih dari {} hari", deleted, days),
        ),
    )
    .await;

    Ok(Json(PurgeResponse { success: true, deleted }))
}
