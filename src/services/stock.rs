//! Stock and expiry classification of a single product.
//!
//! Every place that needs to know whether a product is low, out of stock,
//! expired or expiring soon goes through these functions, so the suggestion
//! list, the dashboard counters, the product filters and the admin overview
//! always agree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    common::thresholds::{EXPIRING_SOON_DAYS, OUT_OF_STOCK_LEVEL},
    models::product::{Product, StatusFilter},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum StockLevel {
    OutOfStock,
    LowStock,
    Sufficient,
}

impl StockLevel {
    /// Out of stock and low stock both count as "needs buying".
    pub fn needs_restock(self) -> bool {
        !matches!(self, StockLevel::Sufficient)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryState {
    Expired { days_ago: i64 },
    ExpiringSoon { days_left: i64 },
    Fresh { days_left: i64 },
    NoExpiry,
}

impl ExpiryState {
    /// Whole days until expiry; negative once expired.
    pub fn days_left(self) -> Option<i64> {
        match self {
            ExpiryState::Expired { days_ago } => Some(-days_ago),
            ExpiryState::ExpiringSoon { days_left } | ExpiryState::Fresh { days_left } => {
                Some(days_left)
            }
            ExpiryState::NoExpiry => None,
        }
    }
}

pub fn stock_level(quantity: Decimal, min_level: Decimal) -> StockLevel {
    if quantity <= OUT_OF_STOCK_LEVEL {
        StockLevel::OutOfStock
    } else if quantity <= min_level {
        StockLevel::LowStock
    } else {
        StockLevel::Sufficient
    }
}

/// Date-only comparison: a product expiring today is expiring soon with 0 days
/// left, never expired.
pub fn expiry_state(expiry_date: Option<NaiveDate>, today: NaiveDate) -> ExpiryState {
    let Some(expiry_date) = expiry_date else {
        return ExpiryState::NoExpiry;
    };

    let days = (expiry_date - today).num_days();
    if days < 0 {
        ExpiryState::Expired { days_ago: -days }
    } else if days <= EXPIRING_SOON_DAYS {
        ExpiryState::ExpiringSoon { days_left: days }
    } else {
        ExpiryState::Fresh { days_left: days }
    }
}

pub fn product_stock_level(product: &Product) -> StockLevel {
    stock_level(product.stock_quantity, product.min_stock_level)
}

pub fn product_expiry_state(product: &Product, today: NaiveDate) -> ExpiryState {
    expiry_state(product.expiry_date, today)
}

pub fn matches_filter(product: &Product, filter: StatusFilter, today: NaiveDate) -> bool {
    match filter {
        StatusFilter::All => true,
        StatusFilter::LowStock => product_stock_level(product) == StockLevel::LowStock,
        StatusFilter::OutOfStock => product_stock_level(product) == StockLevel::OutOfStock,
        StatusFilter::Expiring => matches!(
            product_expiry_state(product, today),
            ExpiryState::ExpiringSoon { .. }
        ),
        StatusFilter::Expired => {
            matches!(product_expiry_state(product, today), ExpiryState::Expired { .. })
        }
    }
}

/// Independent stock and expiry tallies: one product can count as both low
/// stock and expired.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryCounts {
    pub total_products: usize,
    pub out_of_stock: usize,
    pub low_stock: usize,
    pub expiring_soon: usize,
    pub expired: usize,
}

impl InventoryCounts {
    pub fn tally<'a>(products: impl IntoIterator<Item = &'a Product>, today: NaiveDate) -> Self {
        let mut counts = Self::default();
        for product in products {
            counts.total_products += 1;
            match product_stock_level(product) {
                StockLevel::OutOfStock => counts.out_of_stock += 1,
                StockLevel::LowStock => counts.low_stock += 1,
                StockLevel::Sufficient => {}
            }
            match product_expiry_state(product, today) {
                ExpiryState::Expired { .. } => counts.expired += 1,
                ExpiryState::ExpiringSoon { .. } => counts.expiring_soon += 1,
                ExpiryState::Fresh { .. } | ExpiryState::NoExpiry => {}
            }
        }
        counts
    }
}
