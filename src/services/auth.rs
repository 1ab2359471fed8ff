// src/services/auth.rs

use std::sync::Arc;

use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    db::{ActivityStore, UserRepository},
    models::{
        activity::{ActivityAction, NewActivity},
        auth::{Claims, User},
    },
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    activity: Arc<dyn ActivityStore>,
    keys: TokenKeys,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, activity: Arc<dyn ActivityStore>, keys: TokenKeys) -> Self {
        Self { user_repo, activity, keys }
    }

    pub async fn register_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<String, AppError> {
        // bcrypt runs on the blocking pool
        let password_clone = password.to_owned();
        let hashed_password = tokio::task::spawn_blocking(move || {
            hash(&password_clone, bcrypt::DEFAULT_COST)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Hashing task failed: {}", e))??;

        let new_user = self
            .user_repo
            .create_user(name.trim(), &email.trim().to_lowercase(), &hashed_password)
            .await?;

        tracing::info!(user_id = new_user.id, "user registered");
        self.log(NewActivity::new(
            Some(new_user.id),
            ActivityAction::Register,
            format!("Pendaftaran akun {}", new_user.email),
        ))
        .await;

        self.keys.create_token(&new_user)
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .user_repo
            .find_by_email(email.trim())
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        let password_clone = password.to_owned();
        let password_hash_clone = user.password_hash.clone();
        let is_password_valid = tokio::task::spawn_blocking(move || {
            verify(&password_clone, &password_hash_clone)
        })
        .await
        .map_err(|e| anyhow::anyhow!("Password verification task failed: {}", e))??;

        if !is_password_valid {
            return Err(AppError::InvalidCredentials);
        }
        if !user.is_active {
            return Err(AppError::AccountDisabled);
        }

        tracing::info!(user_id = user.id, "user logged in");
        self.log(NewActivity::new(
            Some(user.id),
            ActivityAction::Login,
            format!("Login {}", user.email),
        ))
        .await;

        self.keys.create_token(&user)
    }

    /// Resolves a bearer token to an active user.
    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let claims = self.keys.decode_token(token)?;

        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if !user.is_active {
            return Err(AppError::AccountDisabled);
        }
        Ok(user)
    }

    async fn log(&self, entry: NewActivity) {
        if let Err(e) = self.activity.record(entry).await {
            tracing::warn!("Failed to record activity: {}", e);
        }
    }
}

// ---
// Token signing
// ---

/// HS256 secret plus token lifetime.
#[derive(Clone)]
pub struct TokenKeys {
    secret: String,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: impl Into<String>, ttl: Duration) -> Self {
        Self {
            secret: secret.into(),
            ttl,
        }
    }

    pub fn create_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            role: user.role,
            exp: (now + self.ttl).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        Ok(encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )?)
    }

    /// Any decoding failure (bad signature, malformed, expired) is an invalid token.
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_ref()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| AppError::InvalidToken)
    }
}
