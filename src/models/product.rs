// src/models/product.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::common::{
    pagination::PageParams,
    thresholds::{MAX_QUANTITY, QUANTITY_SCALE},
};
use crate::services::stock::{ExpiryState, StockLevel};

// Product rows keep their column names on the wire; suggestion payloads spread
// these fields and add their own camelCase keys next to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Product {
    pub id: i64,
    pub user_id: i64,
    #[schema(example = "Beras")]
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = f64, example = 2.5)]
    pub stock_quantity: Decimal,
    #[schema(value_type = f64, example = 1)]
    pub min_stock_level: Decimal,
    #[schema(example = "kg")]
    pub unit: Option<String>,
    pub expiry_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// `"<stock> <unit>"`, or just the stock when the product has no unit.
    pub fn stock_badge(&self) -> String {
        let quantity = self.stock_quantity.normalize();
        match self.unit.as_deref().map(str::trim) {
            Some(unit) if !unit.is_empty() => format!("{} {}", quantity, unit),
            _ => quantity.to_string(),
        }
    }
}

/// Admin listing row: a product plus who owns it.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ProductWithOwner {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub product: Product,
    pub owner_name: String,
    pub owner_email: String,
}

/// A product annotated with its classification, as returned by the product list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView<T> {
    #[serde(flatten)]
    pub product: T,
    pub stock_status: StockLevel,
    pub expiry_status: ExpiryStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_left: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ExpiryStatus {
    Expired,
    Expiring,
    Fresh,
    #[serde(rename = "none")]
    NoExpiry,
}

impl From<ExpiryState> for ExpiryStatus {
    fn from(state: ExpiryState) -> Self {
        match state {
            ExpiryState::Expired { .. } => ExpiryStatus::Expired,
            ExpiryState::ExpiringSoon { .. } => ExpiryStatus::Expiring,
            ExpiryState::Fresh { .. } => ExpiryStatus::Fresh,
            ExpiryState::NoExpiry => ExpiryStatus::NoExpiry,
        }
    }
}

// ---
// Validation
// ---

/// The reason a quantity cannot be stored, if any.
pub fn quantity_problem(val: &Decimal) -> Option<&'static str> {
    if *val < Decimal::ZERO {
        Some("Nilai tidak boleh negatif.")
    } else if *val > MAX_QUANTITY {
        Some("Nilai maksimal 9999999999.99.")
    } else if val.normalize().scale() > QUANTITY_SCALE {
        Some("Nilai maksimal 2 angka di belakang koma.")
    } else {
        None
    }
}

fn validate_quantity(val: &Decimal) -> Result<(), ValidationError> {
    match quantity_problem(val) {
        Some(message) => {
            let mut err = ValidationError::new("range");
            err.add_param("min".into(), &0.0);
            err.add_param("max".into(), &MAX_QUANTITY.to_string());
            err.message = Some(message.into());
            Err(err)
        }
        None => Ok(()),
    }
}

/// Body of `POST /api/products` and `PUT /api/products/{id}`.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductPayload {
    #[validate(length(min = 1, max = 120, message = "Nama produk wajib diisi (maks. 120 karakter)."))]
    pub name: String,

    pub description: Option<String>,

    #[validate(custom(function = "validate_quantity"))]
    #[serde(default)]
    #[schema(value_type = f64)]
    pub stock_quantity: Decimal,

    #[validate(custom(function = "validate_quantity"))]
    #[serde(default)]
    #[schema(value_type = f64)]
    pub min_stock_level: Decimal,

    #[validate(length(max = 20, message = "Satuan maksimal 20 karakter."))]
    pub unit: Option<String>,

    pub expiry_date: Option<NaiveDate>,
}

impl ProductPayload {
    /// Trims text fields and turns blank optional strings into `None`.
    pub fn normalized(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.description = non_blank(self.description);
        self.unit = non_blank(self.unit);
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    #[default]
    All,
    LowStock,
    OutOfStock,
    Expiring,
    Expired,
}

/// Query string of the product listings.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Case-insensitive match on the product name.
    pub q: Option<String>,
    pub status: Option<StatusFilter>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ProductQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams { page: self.page, limit: self.limit }
    }

    pub fn search_term(&self) -> Option<String> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, stock: i64) -> ProductPayload {
        ProductPayload {
            name: name.to_string(),
            description: Some("   ".to_string()),
            stock_quantity: Decimal::from(stock),
            min_stock_level: Decimal::ONE,
            unit: Some(" kg ".to_string()),
            expiry_date: None,
        }
    }

    #[test]
    fn negative_stock_is_rejected() {
        let errors = payload("Gula", -1).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("stock_quantity"));
    }

    #[test]
    fn quantities_must_fit_the_column() {
        let errors = payload("Gula", 1_000_000_000_000).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("stock_quantity"));

        let mut body = payload("Gula", 1);
        body.min_stock_level = Decimal::new(1234, 3);
        let errors = body.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("min_stock_level"));

        let mut body = payload("Gula", 1);
        body.stock_quantity = MAX_QUANTITY;
        body.min_stock_level = Decimal::new(1500, 3);
        assert!(body.validate().is_ok());
    }

    #[test]
    fn empty_name_is_rejected() {
        let errors = payload("", 1).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn normalized_drops_blank_strings() {
        let normalized = payload("  Gula  ", 1).normalized();
        assert_eq!(normalized.name, "Gula");
        assert_eq!(normalized.description, None);
        assert_eq!(normalized.unit.as_deref(), Some("kg"));
    }

    #[test]
    fn status_filter_parses_kebab_case() {
        let filter: StatusFilter = serde_json::from_str("\"out-of-stock\"").unwrap();
        assert_eq!(filter, StatusFilter::OutOfStock);
    }

    #[test]
    fn search_term_ignores_blank_queries() {
        let query = ProductQuery { q: Some("  ".into()), ..Default::default() };
        assert_eq!(query.search_term(), None);

        let query = ProductQuery { q: Some(" Beras ".into()), ..Default::default() };
        assert_eq!(query.search_term().as_deref(), Some("beras"));
    }
}
