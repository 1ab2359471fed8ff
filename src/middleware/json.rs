// src/middleware/json.rs

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

use crate::common::error::AppError;

// JSON body extractor whose rejections use the `{success:false, error}` envelope
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => Err(rejection.into()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected JSON body: {}", rejection.body_text());
        let message = match rejection {
            JsonRejection::MissingJsonContentType(_) => {
                "Header Content-Type harus application/json.".to_string()
            }
            JsonRejection::JsonSyntaxError(_) => "Isi permintaan bukan JSON yang valid.".to_string(),
            JsonRejection::JsonDataError(e) => {
                format!("Isi permintaan tidak sesuai format: {}", e.body_text())
            }
            other => format!("Isi permintaan tidak dapat dibaca: {}", other.body_text()),
        };
        AppError::BadRequest(message)
    }
}
