// src/services/dashboard_service.rs

use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    common::{collation::compare_names, error::AppError, thresholds::DASHBOARD_LIST_LIMIT},
    db::{ActivityStore, ProductStore},
    models::{
        dashboard::{DashboardSummary, ExpiryEntry},
        product::Product,
    },
    services::{stock::InventoryCounts, suggestion_service::build_suggestions},
};

#[derive(Clone)]
pub struct DashboardService {
    products: Arc<dyn ProductStore>,
    activity: Arc<dyn ActivityStore>,
}

impl DashboardService {
    pub fn new(products: Arc<dyn ProductStore>, activity: Arc<dyn ActivityStore>) -> Self {
        Self { products, activity }
    }

    pub async fn get_summary(
        &self,
        user_id: i64,
        today: NaiveDate,
    ) -> Result<DashboardSummary, AppError> {
        let products = self.products.list_for_user(user_id).await?;
        let recent_activity = self
            .activity
            .recent_for_user(user_id, DASHBOARD_LIST_LIMIT as i64)
            .await?;

        Ok(DashboardSummary {
            counts: InventoryCounts::tally(&products, today),
            suggestion_count: build_suggestions(&products, today).stats.total_count,
            upcoming_expiries: upcoming_expiries(&products, today),
            recent_activity,
        })
    }
}

/// Dated products that are not expired yet, soonest first.
fn upcoming_expiries(products: &[Product], today: NaiveDate) -> Vec<ExpiryEntry> {
    let mut entries: Vec<ExpiryEntry> = products
        .iter()
        .filter_map(|p| {
            let expiry_date = p.expiry_date?;
            let days_left = (expiry_date - today).num_days();
            (days_left >= 0).then(|| ExpiryEntry {
                id: p.id,
                name: p.name.clone(),
                expiry_date,
                days_left,
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        a.days_left
            .cmp(&b.days_left)
            .then_with(|| compare_names(&a.name, &b.name))
            .then(a.id.cmp(&b.id))
    });
    entries.truncate(DASHBOARD_LIST_LIMIT);
    entries
}
