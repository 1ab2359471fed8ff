// src/db/activity_repo.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{
    common::{error::AppError, pagination::{Page, PageParams}},
    models::activity::{ActivityLog, ActivityLogEntry, NewActivity},
};

/// Append-only activity log.
#[async_trait]
pub trait ActivityStore: Send + Sync {
    async fn record(&self, entry: NewActivity) -> Result<ActivityLog, AppError>;

    async fn recent_for_user(&self, user_id: i64, limit: i64) -> Result<Vec<ActivityLog>, AppError>;

    /// Newest first, optionally restricted to one user.
    async fn list(
        &self,
        user_id: Option<i64>,
        params: PageParams,
    ) -> Result<Page<ActivityLogEntry>, AppError>;

    /// Deletes entries created before `cutoff`, returning how many were removed.
    async fn purge_before(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError>;
}

#[derive(Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityStore for ActivityRepository {
    async fn record(&self, entry: NewActivity) -> Result<ActivityLog, AppError> {
        let log = sqlx::query_as::<_, ActivityLog>(
            r#"
            INSERT INTO activity_logs (user_id, action, entity_id, description)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(entry.user_id)
        .bind(entry.action.as_str())
        .bind(entry.entity_id)
        .bind(&entry.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(log)
    }

    async fn recent_for_user(&self, user_id: i64, limit: i64) -> Result<Vec<ActivityLog>, AppError> {
        let logs = sqlx::query_as::<_, ActivityLog>(
            r#"
            SELECT * FROM activity_logs
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(logs)
    }

    async fn list(
        &self,
        user_id: Option<i64>,
        params: PageParams,
    ) -> Result<Page<ActivityLogEntry>, AppError> {
        // Snapshot-consistent count and page.
        let mut tx = self.pool.begin().await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM activity_logs WHERE ($1::BIGINT IS NULL OR user_id = $1)",
        )
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        let items = sqlx::query_as::<_, ActivityLogEntry>(
            r#"
            SELECT a.*, u.name AS user_name
            FROM activity_logs a
            LEFT JOIN users u ON u.id = a.user_id
            WHERE ($1::BIGINT IS NULL OR a.user_id = $1)
            ORDER BY a.created_at DESC, a.id DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(params.limit())
        .bind(params.offset())
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Page::new(items, params, total))
    }

    async fn purge_before(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM activity_logs WHERE created_at < $1")
            .bind(cutoff)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
