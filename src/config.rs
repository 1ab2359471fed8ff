// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use chrono::TimeDelta;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    common::thresholds::MAX_TOKEN_TTL_DAYS,
    db::{
        ActivityRepository, ActivityStore, NoteRepository, ProductRepository, ProductStore,
        UserRepository,
    },
    services::{
        auth::{AuthService, TokenKeys},
        dashboard_service::DashboardService,
        product_service::ProductService,
        suggestion_service::SuggestionService,
    },
};

// ---
// Environment
// ---

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub jwt_ttl: TimeDelta,
}

impl AppConfig {
    /// Reads `.env` (if present) and the process environment.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 5)?,
            jwt_ttl: token_ttl(parse_or("JWT_TTL_DAYS", 7)?)?,
        })
    }
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}

/// Token lifetime in whole days, between one day and ten years.
fn token_ttl(days: i64) -> anyhow::Result<TimeDelta> {
    if !(1..=MAX_TOKEN_TTL_DAYS).contains(&days) {
        anyhow::bail!(
            "JWT_TTL_DAYS must be between 1 and {}, got {}",
            MAX_TOKEN_TTL_DAYS,
            days
        );
    }
    TimeDelta::try_days(days).context("JWT_TTL_DAYS is out of range")
}

// ---
// Shared state
// ---

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub user_repo: UserRepository,
    pub note_repo: NoteRepository,
    pub activity: Arc<dyn ActivityStore>,
    pub product_service: ProductService,
    pub suggestion_service: SuggestionService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub async fn new(config: AppConfig) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Failed to connect to the database")?;

        tracing::info!("✅ Database connection established");

        let products: Arc<dyn ProductStore> = Arc::new(ProductRepository::new(db_pool.clone()));
        let activity: Arc<dyn ActivityStore> = Arc::new(ActivityRepository::new(db_pool.clone()));

        Ok(Self::assemble(db_pool, config, products, activity))
    }

    /// Wires services on top of the given product and activity stores.
    pub fn assemble(
        db_pool: PgPool,
        config: AppConfig,
        products: Arc<dyn ProductStore>,
        activity: Arc<dyn ActivityStore>,
    ) -> Self {
        let user_repo = UserRepository::new(db_pool.clone());
        let note_repo = NoteRepository::new(db_pool.clone());
        let keys = TokenKeys::new(config.jwt_secret.clone(), config.jwt_ttl);

        Self {
            auth_service: AuthService::new(user_repo.clone(), activity.clone(), keys),
            product_service: ProductService::new(products.clone(), activity.clone()),
            suggestion_service: SuggestionService::new(products.clone(), activity.clone()),
            dashboard_service: DashboardService::new(products, activity.clone()),
            user_repo,
            note_repo,
            activity,
            db_pool,
        }
    }
}
