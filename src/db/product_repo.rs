// src/db/product_repo.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    models::product::{Product, ProductPayload, ProductWithOwner},
};

/// Product persistence. Every per-user method only sees rows owned by `user_id`;
/// a row owned by someone else behaves exactly like a missing one.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Product>, AppError>;

    async fn list_all(&self) -> Result<Vec<ProductWithOwner>, AppError>;

    async fn find(&self, user_id: i64, id: i64) -> Result<Option<Product>, AppError>;

    async fn create(&self, user_id: i64, input: &ProductPayload) -> Result<Product, AppError>;

    async fn update(
        &self,
        user_id: i64,
        id: i64,
        input: &ProductPayload,
    ) -> Result<Option<Product>, AppError>;

    async fn delete(&self, user_id: i64, id: i64) -> Result<Option<Product>, AppError>;

    /// Admin removal, regardless of owner.
    async fn delete_any(&self, id: i64) -> Result<Option<Product>, AppError>;

    async fn restock(
        &self,
        user_id: i64,
        id: i64,
        quantity: Decimal,
        expiry_date: Option<NaiveDate>,
    ) -> Result<Option<Product>, AppError>;

    async fn set_stock(
        &self,
        user_id: i64,
        id: i64,
        quantity: Decimal,
    ) -> Result<Option<Product>, AppError>;
}

#[derive(Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE user_id = $1 ORDER BY id ASC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    async fn list_all(&self) -> Result<Vec<ProductWithOwner>, AppError> {
        let products = sqlx::query_as::<_, ProductWithOwner>(
            r#"
            SELECT p.*, u.name AS owner_name, u.email AS owner_email
            FROM products p
            JOIN users u ON u.id = p.user_id
            ORDER BY p.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    async fn find(&self, user_id: i64, id: i64) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    async fn create(&self, user_id: i64, input: &ProductPayload) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (user_id, name, description, stock_quantity, min_stock_level, unit, expiry_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.stock_quantity)
        .bind(input.min_stock_level)
        .bind(&input.unit)
        .bind(input.expiry_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }

    async fn update(
        &self,
        user_id: i64,
        id: i64,
        input: &ProductPayload,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = $3,
                description = $4,
                stock_quantity = $5,
                min_stock_level = $6,
                unit = $7,
                expiry_date = $8,
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.stock_quantity)
        .bind(input.min_stock_level)
        .bind(&input.unit)
        .bind(input.expiry_date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            "DELETE FROM products WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    async fn delete_any(&self, id: i64) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>("DELETE FROM products WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    async fn restock(
        &self,
        user_id: i64,
        id: i64,
        quantity: Decimal,
        expiry_date: Option<NaiveDate>,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET stock_quantity = $3, expiry_date = $4, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(quantity)
        .bind(expiry_date)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    async fn set_stock(
        &self,
        user_id: i64,
        id: i64,
        quantity: Decimal,
    ) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET stock_quantity = $3, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(quantity)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }
}
