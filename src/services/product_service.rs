// src/services/product_service.rs

use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    common::{collation::compare_names, error::AppError, pagination::Page},
    db::{ActivityStore, ProductStore},
    models::{
        activity::{ActivityAction, NewActivity},
        product::{
            Product, ProductPayload, ProductQuery, ProductView, ProductWithOwner, StatusFilter,
        },
    },
    services::stock,
};

/// Annotates a product with its stock and expiry classification.
pub fn classify<T>(product: T, base: &Product, today: NaiveDate) -> ProductView<T> {
    let expiry = stock::product_expiry_state(base, today);
    ProductView {
        stock_status: stock::product_stock_level(base),
        expiry_status: expiry.into(),
        days_left: expiry.days_left(),
        product,
    }
}

fn by_name(a: &Product, b: &Product) -> std::cmp::Ordering {
    compare_names(&a.name, &b.name).then(a.id.cmp(&b.id))
}

fn matches_query(product: &Product, query: &ProductQuery, search: Option<&str>, today: NaiveDate) -> bool {
    let status = query.status.unwrap_or(StatusFilter::All);
    let name_matches = search.is_none_or(|q| product.name.to_lowercase().contains(q));
    name_matches && stock::matches_filter(product, status, today)
}

#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductStore>,
    activity: Arc<dyn ActivityStore>,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductStore>, activity: Arc<dyn ActivityStore>) -> Self {
        Self { products, activity }
    }

    async fn log(&self, entry: NewActivity) {
        if let Err(e) = self.activity.record(entry).await {
            tracing::warn!("Failed to record activity: {}", e);
        }
    }

    // --- Listing ---
    pub async fn list(
        &self,
        user_id: i64,
        query: &ProductQuery,
        today: NaiveDate,
    ) -> Result<Page<ProductView<Product>>, AppError> {
        let search = query.search_term();
        let mut matching: Vec<Product> = self
            .products
            .list_for_user(user_id)
            .await?
            .into_iter()
            .filter(|p| matches_query(p, query, search.as_deref(), today))
            .collect();
        matching.sort_by(by_name);

        Ok(Page::from_vec(matching, query.page_params()).map(|p| {
            let base = p.clone();
            classify(p, &base, today)
        }))
    }

    /// Every account's products, for the admin panel.
    pub async fn list_all(
        &self,
        query: &ProductQuery,
        today: NaiveDate,
    ) -> Result<Page<ProductView<ProductWithOwner>>, AppError> {
        let search = query.search_term();
        let mut matching: Vec<ProductWithOwner> = self
            .products
            .list_all()
            .await?
            .into_iter()
            .filter(|row| matches_query(&row.product, query, search.as_deref(), today))
            .collect();
        matching.sort_by(|a, b| by_name(&a.product, &b.product));

        Ok(Page::from_vec(matching, query.page_params()).map(|row| {
            let base = row.product.clone();
            classify(row, &base, today)
        }))
    }

    /// Every product of every account, unpaginated, for rollups.
    pub async fn all_products(&self) -> Result<Vec<Product>, AppError> {
        Ok(self
            .products
            .list_all()
            .await?
            .into_iter()
            .map(|row| row.product)
            .collect())
    }

    pub async fn get(&self, user_id: i64, id: i64) -> Result<Product, AppError> {
        self.products
            .find(user_id, id)
            .await?
            .ok_or(AppError::ProductNotFound)
    }

    pub async fn create(&self, user_id: i64, input: ProductPayload) -> Result<Product, AppError> {
        let input = input.normalized();
        let product = self.products.create(user_id, &input).await?;

        self.log(
            NewActivity::new(
                Some(user_id),
                ActivityAction::ProductCreate,
                format!("Menambahkan produk {}", product.name),
            )
            .with_entity(product.id),
        )
        .await;

        Ok(product)
    }

    pub async fn update(
        &self,
        user_id: i64,
        id: i64,
        input: ProductPayload,
    ) -> Result<Product, AppError> {
        let input = input.normalized();
        let product = self
            .products
            .update(user_id, id, &input)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        self.log(
            NewActivity::new(
                Some(user_id),
                ActivityAction::ProductUpdate,
                format!("Memperbarui produk {}", product.name),
            )
            .with_entity(product.id),
        )
        .await;

        Ok(product)
    }

    pub async fn delete(&self, user_id: i64, id: i64) -> Result<(), AppError> {
        let product = self
            .products
            .delete(user_id, id)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        self.log(
            NewActivity::new(
                Some(user_id),
                ActivityAction::ProductDelete,
                format!("Menghapus produk {}", product.name),
            )
            .with_entity(product.id),
        )
        .await;

        Ok(())
    }

    /// Admin removal of any account's product; logged under the admin.
    pub async fn delete_any(&self, admin_id: i64, id: i64) -> Result<(), AppError> {
        let product = self
            .products
            .delete_any(id)
            .await?
            .ok_or(AppError::ProductNotFound)?;

        self.log(
            NewActivity::new(
                Some(admin_id),
                ActivityAction::AdminProductDelete,
                format!(
                    "Admin menghapus produk {} milik pengguna #{}",
                    product.name, product.user_id
                ),
            )
            .with_entity(product.id),
        )
        .await;

        Ok(())
    }
}
