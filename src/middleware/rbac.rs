// src/middleware/rbac.rs

use std::marker::PhantomData;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    common::error::AppError,
    middleware::auth::AuthenticatedUser,
    models::auth::{Role, User},
};

/// A role a route can demand.
pub trait RoleDef: Send + Sync + 'static {
    fn role() -> Role;
}

/// Extractor that only succeeds for users holding `T`'s role. Carries the user.
pub struct RequireRole<T>(pub User, pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let AuthenticatedUser(user) = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or(AppError::InvalidToken)?;

        if user.role != T::role() {
            tracing::warn!(user_id = user.id, required = ?T::role(), "role check failed");
            return Err(AppError::Forbidden);
        }

        Ok(RequireRole(user, PhantomData))
    }
}

// ---
// Roles
// ---

pub struct AdminRole;
impl RoleDef for AdminRole {
    fn role() -> Role { Role::Admin }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use chrono::Utc;

    fn parts_with(user: Option<User>) -> Parts {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();
        if let Some(user) = user {
            parts.extensions.insert(AuthenticatedUser(user));
        }
        parts
    }

    fn user(role: Role) -> User {
        User {
            id: 7,
            name: "Budi".into(),
            email: "budi@example.com".into(),
            password_hash: String::new(),
            role,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn admin_passes() {
        let mut parts = parts_with(Some(user(Role::Admin)));
        let RequireRole(admin, _) = RequireRole::<AdminRole>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(admin.id, 7);
    }

    #[tokio::test]
    async fn regular_user_is_forbidden() {
        let mut parts = parts_with(Some(user(Role::User)));
        let result = RequireRole::<AdminRole>::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::Forbidden)));
    }

    #[tokio::test]
    async fn missing_user_is_unauthorized() {
        let mut parts = parts_with(None);
        let result = RequireRole::<AdminRole>::from_request_parts(&mut parts, &()).await;
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }
}
