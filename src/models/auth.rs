// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::common::pagination::PageParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")] // Database
#[serde(rename_all = "lowercase")] // JSON
pub enum Role {
    User,
    Admin,
}

// A user row as stored in the database
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,

    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password_hash: String,

    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterUserPayload {
    #[validate(length(min = 1, max = 100, message = "Nama wajib diisi."))]
    #[schema(example = "Siti Aminah")]
    pub name: String,
    #[validate(email(message = "Format email tidak valid."))]
    #[schema(example = "siti@example.com")]
    pub email: String,
    #[validate(length(min = 6, message = "Kata sandi minimal 6 karakter."))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginUserPayload {
    #[validate(email(message = "Format email tidak valid."))]
    pub email: String,
    #[validate(length(min = 1, message = "Kata sandi wajib diisi."))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub token: String,
}

// Claims carried inside the JWT
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,   // User ID
    pub role: Role, // Role at the time the token was issued
    pub exp: usize, // Expiration time
    pub iat: usize, // Issued at
}

// ---
// Admin user management
// ---

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserPayload {
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    /// Matches name or email, case-insensitively.
    pub q: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl UserQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams { page: self.page, limit: self.limit }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserCounts {
    pub total_users: i64,
    pub active_users: i64,
    pub admin_users: i64,
}
