// src/models/suggestion.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    common::error::AppError,
    models::product::{quantity_problem, Product},
};

// ---
// Display strings shown by the shopping list
// ---
pub const CATEGORY_OUT_OF_STOCK: &str = "Stok Habis";
pub const CATEGORY_LOW_STOCK: &str = "Stok Rendah";
pub const CATEGORY_EXPIRED: &str = "Kadaluarsa";
pub const CATEGORY_EXPIRING: &str = "Hampir Kadaluarsa";

pub const ALERT_OUT_OF_STOCK: &str = "HABIS!";
pub const ALERT_LOW_STOCK: &str = "STOK RENDAH!";
pub const ALERT_EXPIRED: &str = "KADALUARSA!";
pub const ALERT_EXPIRING: &str = "Hampir Kadaluarsa!";

pub const ICON_OUT_OF_STOCK: &str = "fa-times-circle";
pub const ICON_LOW_STOCK: &str = "fa-exclamation-triangle";
pub const ICON_EXPIRED: &str = "fa-skull-crossbones";
pub const ICON_EXPIRING: &str = "fa-clock";

pub const BUTTON_BUY: &str = "Beli";
pub const BUTTON_BUY_AND_DISCARD: &str = "Beli & Buang";
pub const BUTTON_USE: &str = "Gunakan";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SuggestionType {
    Expired,
    LowStock,
    Expiring,
}

impl SuggestionType {
    /// Sort rank of the shopping list: expired first, expiring last.
    pub fn priority(self) -> u8 {
        match self {
            SuggestionType::Expired => 1,
            SuggestionType::LowStock => 2,
            SuggestionType::Expiring => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SuggestionType::Expired => "expired",
            SuggestionType::LowStock => "low-stock",
            SuggestionType::Expiring => "expiring",
        }
    }
}

impl std::str::FromStr for SuggestionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "expired" => Ok(SuggestionType::Expired),
            "low-stock" => Ok(SuggestionType::LowStock),
            "expiring" => Ok(SuggestionType::Expiring),
            other => Err(AppError::InvalidSuggestionType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionColor {
    Red,
    Yellow,
    Orange,
}

/// One shopping-list entry: the product's own fields plus how to show it.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    #[serde(flatten)]
    pub product: Product,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: SuggestionType,
    pub color: SuggestionColor,
    pub badge: String,
    pub alert_text: String,
    pub alert_icon: String,
    pub button_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_expired: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_left: Option<i64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionStats {
    pub expired_count: usize,
    pub out_of_stock_count: usize,
    pub low_stock_count: usize,
    pub expiring_count: usize,
    pub total_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct SuggestionReport {
    pub suggestions: Vec<Suggestion>,
    pub stats: SuggestionStats,
}

/// Body of `GET /api/suggestions`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SuggestionsResponse {
    pub success: bool,
    pub suggestions: Vec<Suggestion>,
    pub stats: SuggestionStats,
}

/// Body of `GET /api/suggestions/stats`.
#[derive(Debug, Serialize, ToSchema)]
pub struct SuggestionStatsResponse {
    pub success: bool,
    pub stats: SuggestionStats,
}

// ---
// Approval
// ---

/// Body of `POST /api/suggestions/approve`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApproveSuggestionPayload {
    pub product_id: Option<i64>,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[schema(value_type = Option<f64>)]
    pub new_stock: Option<Decimal>,
    pub expiry_date: Option<NaiveDate>,
}

/// What an approval does to the product record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalAction {
    /// Bought a new supply: stock and expiry date are replaced.
    Restock {
        new_stock: Decimal,
        expiry_date: Option<NaiveDate>,
    },
    /// Item was used up: stock goes to zero.
    UseUp,
}

impl ApproveSuggestionPayload {
    pub fn into_action(self) -> Result<(i64, SuggestionType, ApprovalAction), AppError> {
        let product_id = self
            .product_id
            .filter(|id| *id > 0)
            .ok_or_else(|| AppError::BadRequest("productId wajib diisi.".to_string()))?;

        let kind: SuggestionType = self.kind.parse()?;

        let action = match kind {
            SuggestionType::LowStock | SuggestionType::Expired => {
                let new_stock = self.new_stock.ok_or_else(|| {
                    AppError::BadRequest("newStock wajib diisi untuk pembelian.".to_string())
                })?;
                if let Some(problem) = quantity_problem(&new_stock) {
                    return Err(AppError::BadRequest(format!("newStock: {}", problem)));
                }
                ApprovalAction::Restock {
                    new_stock,
                    expiry_date: self.expiry_date,
                }
            }
            SuggestionType::Expiring => ApprovalAction::UseUp,
        };

        Ok((product_id, kind, action))
    }
}

/// Body returned by a successful approval.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApproveSuggestionResponse {
    pub success: bool,
    pub message: String,
    pub product: Product,
}
