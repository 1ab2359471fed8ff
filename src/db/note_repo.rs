// src/db/note_repo.rs

use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::contains_pattern,
    models::note::{Note, NotePayload},
};

#[derive(Clone)]
pub struct NoteRepository {
    pool: PgPool,
}

impl NoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_for_user(&self, user_id: i64, search: Option<&str>) -> Result<Vec<Note>, AppError> {
        let pattern = search.map(contains_pattern);
        let notes = sqlx::query_as::<_, Note>(
            r#"
            SELECT * FROM notes
            WHERE user_id = $1
              AND ($2::TEXT IS NULL OR LOWER(title) LIKE $2 ESCAPE '\' OR LOWER(content) LIKE $2 ESCAPE '\')
            ORDER BY updated_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(notes)
    }

    pub async fn create(&self, user_id: i64, input: &NotePayload) -> Result<Note, AppError> {
        let note = sqlx::query_as::<_, Note>(
            "INSERT INTO notes (user_id, title, content) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(user_id)
        .bind(input.title.trim())
        .bind(&input.content)
        .fetch_one(&self.pool)
        .await?;
        Ok(note)
    }

    pub async fn update(&self, user_id: i64, id: i64, input: &NotePayload) -> Result<Option<Note>, AppError> {
        let note = sqlx::query_as::<_, Note>(
            r#"
            UPDATE notes
            SET title = $3, content = $4, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(input.title.trim())
        .bind(&input.content)
        .fetch_optional(&self.pool)
        .await?;
        Ok(note)
    }

    pub async fn delete(&self, user_id: i64, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
