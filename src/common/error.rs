// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unrecognized suggestion type: {0}")]
    InvalidSuggestionType(String),

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Forbidden")]
    Forbidden,

    #[error("Account disabled")]
    AccountDisabled,

    #[error("User not found")]
    UserNotFound,

    #[error("Product not found")]
    ProductNotFound,

    #[error("Note not found")]
    NoteNotFound,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Bcrypt error: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("JWT error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::BadRequest(_)
            | AppError::InvalidSuggestionType(_) => StatusCode::BAD_REQUEST,
            AppError::EmailAlreadyExists => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden | AppError::AccountDisabled => StatusCode::FORBIDDEN,
            AppError::UserNotFound | AppError::ProductNotFound | AppError::NoteNotFound => {
                StatusCode::NOT_FOUND
            }
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::BcryptError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "success": false,
                    "error": "Satu atau lebih isian tidak valid.",
                    "details": details,
                }));
                return (status, body).into_response();
            }
            AppError::BadRequest(message) => message,
            AppError::InvalidSuggestionType(kind) => {
                format!("Tipe saran '{}' tidak dikenali.", kind)
            }
            AppError::EmailAlreadyExists => "Email ini sudah terdaftar.".to_string(),
            AppError::InvalidCredentials => "Email atau kata sandi salah.".to_string(),
            AppError::InvalidToken => "Token tidak valid atau tidak ada.".to_string(),
            AppError::Forbidden => "Anda tidak memiliki akses ke halaman ini.".to_string(),
            AppError::AccountDisabled => "Akun Anda telah dinonaktifkan.".to_string(),
            AppError::UserNotFound => "Pengguna tidak ditemukan.".to_string(),
            AppError::ProductNotFound => "Produk tidak ditemukan.".to_string(),
            AppError::NoteNotFound => "Catatan tidak ditemukan.".to_string(),

            // Storage, hashing and token faults: log the detail, hide it from the client.
            ref e => {
                tracing::error!("Internal server error: {}", e);
                "Terjadi kesalahan pada server.".to_string()
            }
        };

        let body = Json(json!({ "success": false, "error": message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::{ValidationError, ValidationErrors};

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        serde_json::from_slice(&bytes).expect("body should be json")
    }

    #[test]
    fn caller_errors_map_to_4xx() {
        assert_eq!(AppError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::InvalidSuggestionType("restock".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::ProductNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::EmailAlreadyExists.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn storage_faults_hide_details() {
        let response = AppError::DatabaseError(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Terjadi kesalahan pada server.");
    }

    #[tokio::test]
    async fn validation_errors_list_field_messages() {
        let mut error = ValidationError::new("length");
        error.message = Some("Nama produk wajib diisi.".into());
        let mut errors = ValidationErrors::new();
        errors.add("name", error);

        let response = AppError::ValidationError(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["details"]["name"][0], "Nama produk wajib diisi.");
    }
}
