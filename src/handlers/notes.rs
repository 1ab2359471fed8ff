// src/handlers/notes.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::record_activity,
    middleware::{auth::AuthenticatedUser, json::AppJson},
    models::{
        activity::{ActivityAction, NewActivity},
        note::{Note, NotePayload, NoteQuery},
    },
};

// GET /api/notes
#[utoipa::path(
    get,
    path = "/api/notes",
    tag = "Notes",
    params(NoteQuery),
    responses((status = 200, body = [Note])),
    security(("api_jwt" = []))
)]
pub async fn list_notes(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Query(query): Query<NoteQuery>,
) -> Result<Json<Vec<Note>>, AppError> {
    let search = query.q.as_deref().map(str::trim).filter(|q| !q.is_empty());
    let notes = app_state.note_repo.list_for_user(user.id, search).await?;
    Ok(Json(notes))
}

// POST /api/notes
#[utoipa::path(
    post,
    path = "/api/notes",
    tag = "Notes",
    request_body = NotePayload,
    responses(
        (status = 201, body = Note),
        (status = 400, description = "Isian tidak valid")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_note(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    AppJson(payload): AppJson<NotePayload>,
) -> Result<(StatusCode, Json<Note>), AppError> {
    payload.validate()?;
    let note = app_state.note_repo.create(user.id, &payload).await?;

    record_activity(
        &app_state,
        NewActivity::new(
            Some(user.id),
            ActivityAction::NoteCreate,
            format!("Membuat catatan {}", note.title),
        )
        .with_entity(note.id),
    )
    .await;

    Ok((StatusCode::CREATED, Json(note)))
}

// PUT /api/notes/{id}
#[utoipa::path(
    put,
    path = "/api/notes/{id}",
    tag = "Notes",
    params(("id" = i64, Path, description = "ID catatan")),
    request_body = NotePayload,
    responses(
        (status = 200, body = Note),
        (status = 404, description = "Catatan tidak ditemukan")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_note(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
    AppJson(payload): AppJson<NotePayload>,
) -> Result<Json<Note>, AppError> {
    payload.validate()?;
    let note = app_state
        .note_repo
        .update(user.id, id, &payload)
        .await?
        .ok_or(AppError::NoteNotFound)?;

    record_activity(
        &app_state,
        NewActivity::new(
            Some(user.id),
            ActivityAction::NoteUpdate,
            format!("Memperbarui catatan {}", note.title),
        )
        .with_entity(note.id),
    )
    .await;

    Ok(Json(note))
}

// DELETE /api/notes/{id}
#[utoipa::path(
    delete,
    path = "/api/notes/{id}",
    tag = "Notes",
    params(("id" = i64, Path, description = "ID catatan")),
    responses(
        (status = 204, description = "Catatan dihapus"),
        (status = 404, description = "Catatan tidak ditemukan")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_note(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !app_state.note_repo.delete(user.id, id).await? {
        return Err(AppError::NoteNotFound);
    }

    record_activity(
        &app_state,
        NewActivity::new(Some(user.id), ActivityAction::NoteDelete, "Menghapus catatan")
            .with_entity(id),
    )
    .await;

    Ok(StatusCode::NO_CONTENT)
}
