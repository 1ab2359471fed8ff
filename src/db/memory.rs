// src/db/memory.rs
//
// In-memory stores for service and handler tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::{
    common::{
        error::AppError,
        pagination::{Page, PageParams},
    },
    db::{ActivityStore, ProductStore},
    models::{
        activity::{ActivityLog, ActivityLogEntry, NewActivity},
        product::{Product, ProductPayload, ProductWithOwner},
    },
};

#[derive(Default)]
pub struct MemoryStore {
    products: Mutex<Vec<Product>>,
    activity: Mutex<Vec<ActivityLog>>,
}

impl MemoryStore {
    /// Inserts or replaces a product by id.
    pub fn put(&self, product: Product) {
        let mut products = self.products.lock().unwrap();
        products.retain(|p| p.id != product.id);
        products.push(product);
    }

    pub fn get(&self, id: i64) -> Option<Product> {
        self.products.lock().unwrap().iter().find(|p| p.id == id).cloned()
    }

    pub fn activity_actions(&self) -> Vec<String> {
        self.activity
            .lock()
            .unwrap()
            .iter()
            .map(|log| log.action.clone())
            .collect()
    }

    fn modify(
        &self,
        user_id: i64,
        id: i64,
        change: impl FnOnce(&mut Product),
    ) -> Option<Product> {
        let mut products = self.products.lock().unwrap();
        let product = products
            .iter_mut()
            .find(|p| p.id == id && p.user_id == user_id)?;
        change(product);
        product.updated_at = Utc::now();
        Some(product.clone())
    }

    fn remove(&self, predicate: impl Fn(&Product) -> bool) -> Option<Product> {
        let mut products = self.products.lock().unwrap();
        let index = products.iter().position(|p| predicate(p))?;
        Some(products.remove(index))
    }
}

fn sorted(mut products: Vec<Product>) -> Vec<Product> {
    products.sort_by_key(|p| p.id);
    products
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Product>, AppError> {
        let products = self.products.lock().unwrap();
        Ok(sorted(
            products.iter().filter(|p| p.user_id == user_id).cloned().collect(),
        ))
    }

    async fn list_all(&self) -> Result<Vec<ProductWithOwner>, AppError> {
        let products = sorted(self.products.lock().unwrap().clone());
        Ok(products
            .into_iter()
            .map(|product| ProductWithOwner {
                owner_name: format!("user-{}", product.user_id),
                owner_email: format!("user-{}@example.com", product.user_id),
                product,
            })
            .collect())
    }

    async fn find(&self, user_id: i64, id: i64) -> Result<Option<Product>, AppError> {
        Ok(self.get(id).filter(|p| p.user_id == user_id))
    }

    async fn create(&self, user_id: i64, input: &ProductPayload) -> Result<Product, AppError> {
        let mut products = self.products.lock().unwrap();
        let id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let now = Utc::now();
        let product = Product {
            id,
            user_id,
            name: input.name.clone(),
            description: input.description.clone(),
            stock_quantity: input.stock_quantity,
            min_stock_level: input.min_stock_level,
            unit: input.unit.clone(),
            expiry_date: input.expiry_date,
            created_at: now,
            updated_at: now,
        };
        products.push(product.clone());
        Ok(product)
    }

    async fn update(
        &self,
        user_id: i64,
        id: i64,
        input: &ProductPayload,
    ) -> Result<Option<Product>, AppError> {
        Ok(self.modify(user_id, id, |p| {
            p.name = input.name.clone();
            p.description = input.description.clone();
            p.stock_quantity = input.stock_quantity;
            p.min_stock_level = input.min_stock_level;
            p.unit = input.unit.clone();
            p.expiry_date = input.expiry_date;
        }))
    }

    async fn delete(&self, user_id: i64, id: i64) -> Result<Option<Product>, AppError> {
        Ok(self.remove(|p| p.id == id && p.user_id == user_id))
    }

    async fn delete_any(&self, id: i64) -> Result<Option<Product>, AppError> {
        Ok(self.remove(|p| p.id == id))
    }

    async fn restock(
        &self,
        user_id: i64,
        id: i64,
        quantity: Decimal,
        expiry_date: Option<NaiveDate>,
    ) -> Result<Option<Product>, AppError> {
        Ok(self.modify(user_id, id, |p| {
            p.stock_quantity = quantity;
            p.expiry_date = expiry_date;
        }))
    }

    async fn set_stock(
        &self,
        user_id: i64,
        id: i64,
        quantity: Decimal,
    ) -> Result<Option<Product>, AppError> {
        Ok(self.modify(user_id, id, |p| p.stock_quantity = quantity))
    }
}

#[async_trait]
impl ActivityStore for MemoryStore {
    async fn record(&self, entry: NewActivity) -> Result<ActivityLog, AppError> {
        let mut activity = self.activity.lock().unwrap();
        let log = ActivityLog {
            id: activity.len() as i64 + 1,
            user_id: entry.user_id,
            action: entry.action.as_str().to_string(),
            entity_id: entry.entity_id,
            description: entry.description,
            created_at: Utc::now(),
        };
        activity.push(log.clone());
        Ok(log)
    }

    async fn recent_for_user(&self, user_id: i64, limit: i64) -> Result<Vec<ActivityLog>, AppError> {
        let activity = self.activity.lock().unwrap();
        Ok(activity
            .iter()
            .rev()
            .filter(|log| log.user_id == Some(user_id))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn list(
        &self,
        user_id: Option<i64>,
        params: PageParams,
    ) -> Result<Page<ActivityLogEntry>, AppError> {
        let activity = self.activity.lock().unwrap();
        let entries: Vec<ActivityLogEntry> = activity
            .iter()
            .rev()
            .filter(|log| user_id.is_none() || log.user_id == user_id)
            .map(|log| ActivityLogEntry {
                log: log.clone(),
                user_name: log.user_id.map(|id| format!("user-{}", id)),
            })
            .collect();
        Ok(Page::from_vec(entries, params))
    }

    async fn purge_before(&self, cutoff: DateTime<Utc>) -> Result<u64, AppError> {
        let mut activity = self.activity.lock().unwrap();
        let before = activity.len();
        activity.retain(|log| log.created_at >= cutoff);
        Ok((before - activity.len()) as u64)
    }
}
