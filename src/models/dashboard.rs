// src/models/dashboard.rs

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    models::{activity::ActivityLog, auth::UserCounts},
    services::stock::InventoryCounts,
};

// 1. Top cards plus the two short lists of the home screen
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(flatten)]
    pub counts: InventoryCounts,
    pub suggestion_count: usize,
    pub upcoming_expiries: Vec<ExpiryEntry>,
    pub recent_activity: Vec<ActivityLog>,
}

// 2. A product that has not expired yet, soonest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpiryEntry {
    pub id: i64,
    pub name: String,
    pub expiry_date: NaiveDate,
    pub days_left: i64,
}

// 3. Admin overview across every account
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminOverview {
    pub users: UserCounts,
    pub inventory: InventoryCounts,
}
