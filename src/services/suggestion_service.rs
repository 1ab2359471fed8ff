// src/services/suggestion_service.rs

use std::{collections::HashMap, sync::Arc};

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::{
    common::{collation::compare_names, error::AppError},
    db::{ActivityStore, ProductStore},
    models::{
        activity::{ActivityAction, NewActivity},
        product::Product,
        suggestion::*,
    },
    services::stock::{self, ExpiryState, StockLevel},
};

// ---
// Entry constructors
// ---

fn low_stock_entry(product: Product, level: StockLevel) -> Suggestion {
    let out_of_stock = level == StockLevel::OutOfStock;
    Suggestion {
        badge: product.stock_badge(),
        product,
        category: (if out_of_stock { CATEGORY_OUT_OF_STOCK } else { CATEGORY_LOW_STOCK }).to_string(),
        kind: SuggestionType::LowStock,
        color: if out_of_stock { SuggestionColor::Red } else { SuggestionColor::Yellow },
        alert_text: (if out_of_stock { ALERT_OUT_OF_STOCK } else { ALERT_LOW_STOCK }).to_string(),
        alert_icon: (if out_of_stock { ICON_OUT_OF_STOCK } else { ICON_LOW_STOCK }).to_string(),
        button_text: BUTTON_BUY.to_string(),
        is_expired: None,
        days_left: None,
    }
}

/// Rewrites an entry as expired. The badge keeps the stock format.
fn mark_expired(entry: &mut Suggestion) {
    entry.category = CATEGORY_EXPIRED.to_string();
    entry.kind = SuggestionType::Expired;
    entry.color = SuggestionColor::Red;
    entry.alert_text = ALERT_EXPIRED.to_string();
    entry.alert_icon = ICON_EXPIRED.to_string();
    entry.button_text = BUTTON_BUY_AND_DISCARD.to_string();
    entry.is_expired = Some(true);
}

fn expired_entry(product: Product) -> Suggestion {
    let mut entry = low_stock_entry(product, StockLevel::LowStock);
    mark_expired(&mut entry);
    entry
}

fn expiring_entry(product: Product, days_left: i64) -> Suggestion {
    Suggestion {
        product,
        category: CATEGORY_EXPIRING.to_string(),
        kind: SuggestionType::Expiring,
        color: SuggestionColor::Orange,
        badge: format!("{} hari lagi", days_left),
        alert_text: ALERT_EXPIRING.to_string(),
        alert_icon: ICON_EXPIRING.to_string(),
        button_text: BUTTON_USE.to_string(),
        is_expired: None,
        days_left: Some(days_left),
    }
}

// ---
// Aggregation
// ---

/// Builds the shopping list of one user from a snapshot of their products.
///
/// Each product yields at most one entry. Low stock seeds the list, expired
/// entries override or join it, and expiring-soon products are only added when
/// nothing else claimed them. The result is ordered expired, low stock,
/// expiring, then by name.
pub fn build_suggestions(products: &[Product], today: NaiveDate) -> SuggestionReport {
    let mut merged: HashMap<i64, Suggestion> = HashMap::with_capacity(products.len());

    for product in products {
        let level = stock::product_stock_level(product);
        if level.needs_restock() {
            merged.insert(product.id, low_stock_entry(product.clone(), level));
        }
    }

    for product in products {
        if let ExpiryState::Expired { .. } = stock::product_expiry_state(product, today) {
            match merged.get_mut(&product.id) {
                Some(existing) => mark_expired(existing),
                None => {
                    merged.insert(product.id, expired_entry(product.clone()));
                }
            }
        }
    }

    for product in products {
        if let ExpiryState::ExpiringSoon { days_left } = stock::product_expiry_state(product, today) {
            merged
                .entry(product.id)
                .or_insert_with(|| expiring_entry(product.clone(), days_left));
        }
    }

    let mut suggestions: Vec<Suggestion> = merged.into_values().collect();
    suggestions.sort_by(|a, b| {
        a.kind
            .priority()
            .cmp(&b.kind.priority())
            .then_with(|| compare_names(&a.product.name, &b.product.name))
            .then_with(|| a.product.id.cmp(&b.product.id))
    });

    let stats = summarize(&suggestions);
    SuggestionReport { suggestions, stats }
}

/// Counts over the already deduplicated list.
pub fn summarize(suggestions: &[Suggestion]) -> SuggestionStats {
    let mut stats = SuggestionStats {
        total_count: suggestions.len(),
        ..SuggestionStats::default()
    };
    for entry in suggestions {
        match entry.kind {
            SuggestionType::Expired => stats.expired_count += 1,
            SuggestionType::LowStock if entry.product.stock_quantity <= Decimal::ZERO => {
                stats.out_of_stock_count += 1
            }
            SuggestionType::LowStock => stats.low_stock_count += 1,
            SuggestionType::Expiring => stats.expiring_count += 1,
        }
    }
    stats
}

// ---
// Service
// ---

#[derive(Clone)]
pub struct SuggestionService {
    products: Arc<dyn ProductStore>,
    activity: Arc<dyn ActivityStore>,
}

impl SuggestionService {
    pub fn new(products: Arc<dyn ProductStore>, activity: Arc<dyn ActivityStore>) -> Self {
        Self { products, activity }
    }

    pub async fn get_suggestions(
        &self,
        user_id: i64,
        today: NaiveDate,
    ) -> Result<SuggestionReport, AppError> {
        let products = self.products.list_for_user(user_id).await?;
        Ok(build_suggestions(&products, today))
    }

    pub async fn approve(
        &self,
        user_id: i64,
        payload: ApproveSuggestionPayload,
    ) -> Result<Product, AppError> {
        let (product_id, kind, action) = payload.into_action()?;

        let updated = match action {
            ApprovalAction::Restock { new_stock, expiry_date } => {
                self.products
                    .restock(user_id, product_id, new_stock, expiry_date)
                    .await?
            }
            ApprovalAction::UseUp => {
                self.products
                    .set_stock(user_id, product_id, Decimal::ZERO)
                    .await?
            }
        }
        .ok_or(AppError::ProductNotFound)?;

        tracing::info!(
            user_id,
            product_id,
            kind = kind.as_str(),
            "suggestion approved"
        );

        let description = match action {
            ApprovalAction::Restock { new_stock, .. } => format!(
                "Membeli {} (stok baru {})",
                updated.name,
                new_stock.normalize()
            ),
            ApprovalAction::UseUp => format!("Menggunakan {} sebelum kadaluarsa", updated.name),
        };
        let entry = NewActivity::new(Some(user_id), ActivityAction::SuggestionApprove, description)
            .with_entity(updated.id);
        if let Err(e) = self.activity.record(entry).await {
            tracing::warn!("Failed to record activity: {}", e);
        }

        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::Duration;

    use super::*;
    use crate::db::memory::MemoryStore;
    use crate::services::stock::tests::{product, today};

    fn d(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn only(report: &SuggestionReport) -> &Suggestion {
        assert_eq!(report.suggestions.len(), 1, "expected a single suggestion");
        &report.suggestions[0]
    }

    #[test]
    fn empty_input_yields_empty_report() {
        let report = build_suggestions(&[], today());
        assert!(report.suggestions.is_empty());
        assert_eq!(report.stats, SuggestionStats::default());
    }

    #[test]
    fn out_of_stock_without_expiry_is_red_low_stock() {
        let report = build_suggestions(&[product(1, "Beras", d(0), d(2), None)], today());
        let entry = only(&report);
        assert_eq!(entry.kind, SuggestionType::LowStock);
        assert_eq!(entry.color, SuggestionColor::Red);
        assert_eq!(entry.alert_text, "HABIS!");
        assert_eq!(entry.button_text, "Beli");
        assert_eq!(entry.badge, "0 pcs");
        assert_eq!(report.stats.out_of_stock_count, 1);
        assert_eq!(report.stats.low_stock_count, 0);
    }

    #[test]
    fn low_stock_is_yellow() {
        let report = build_suggestions(&[product(1, "Gula", Decimal::new(15, 1), d(2), None)], today());
        let entry = only(&report);
        assert_eq!(entry.kind, SuggestionType::LowStock);
        assert_eq!(entry.color, SuggestionColor::Yellow);
        assert_eq!(entry.alert_text, "STOK RENDAH!");
        assert_eq!(entry.badge, "1.5 pcs");
        assert_eq!(report.stats.low_stock_count, 1);
    }

    #[test]
    fn expired_with_plenty_of_stock_is_inserted_fresh() {
        let report = build_suggestions(&[product(2, "Susu", d(5), d(2), Some(-1))], today());
        let entry = only(&report);
        assert_eq!(entry.kind, SuggestionType::Expired);
        assert_eq!(entry.is_expired, Some(true));
        assert_eq!(entry.button_text, "Beli & Buang");
        assert_eq!(entry.alert_text, "KADALUARSA!");
        assert_eq!(entry.color, SuggestionColor::Red);
        assert_eq!(entry.badge, "5 pcs");
        assert_eq!(entry.days_left, None);
    }

    #[test]
    fn expired_overrides_low_stock_seed() {
        let report = build_suggestions(&[product(3, "Roti", d(1), d(5), Some(-1))], today());
        let entry = only(&report);
        assert_eq!(entry.kind, SuggestionType::Expired);
        assert_eq!(entry.is_expired, Some(true));
        assert_eq!(entry.category, CATEGORY_EXPIRED);
        assert_eq!(report.stats.expired_count, 1);
        assert_eq!(report.stats.low_stock_count, 0);
        assert_eq!(report.stats.total_count, 1);
    }

    #[test]
    fn expiring_soon_carries_days_left() {
        let report = build_suggestions(&[product(4, "Keju", d(10), d(2), Some(3))], today());
        let entry = only(&report);
        assert_eq!(entry.kind, SuggestionType::Expiring);
        assert_eq!(entry.days_left, Some(3));
        assert_eq!(entry.badge, "3 hari lagi");
        assert_eq!(entry.color, SuggestionColor::Orange);
        assert_eq!(entry.button_text, "Gunakan");
        assert_eq!(entry.is_expired, None);
    }

    #[test]
    fn expiring_today_is_not_expired() {
        let report = build_suggestions(&[product(4, "Keju", d(10), d(2), Some(0))], today());
        let entry = only(&report);
        assert_eq!(entry.kind, SuggestionType::Expiring);
        assert_eq!(entry.days_left, Some(0));
        assert_eq!(entry.badge, "0 hari lagi");
    }

    #[test]
    fn far_expiry_with_enough_stock_yields_nothing() {
        let report = build_suggestions(&[product(5, "Teh", d(10), d(2), Some(10))], today());
        assert!(report.suggestions.is_empty());
        assert_eq!(report.stats.total_count, 0);
    }

    #[test]
    fn out_of_stock_and_expiring_stays_low_stock() {
        let report = build_suggestions(&[product(6, "Telur", d(0), d(2), Some(2))], today());
        let entry = only(&report);
        assert_eq!(entry.kind, SuggestionType::LowStock);
        assert_eq!(entry.color, SuggestionColor::Red);
    }

    #[test]
    fn list_is_deduplicated_and_ordered() {
        let products = vec![
            product(1, "Teh", d(10), d(2), Some(5)),
            product(2, "Beras", d(1), d(2), None),
            product(3, "Roti", d(1), d(2), Some(-3)),
            product(4, "Apel", d(10), d(2), Some(1)),
            product(5, "Kopi", d(0), d(1), None),
            product(6, "Mentega", d(9), d(1), Some(-1)),
            product(7, "Garam", d(9), d(1), None),
        ];

        let report = build_suggestions(&products, today());
        let order: Vec<&str> = report
            .suggestions
            .iter()
            .map(|s| s.product.name.as_str())
            .collect();
        assert_eq!(order, vec!["Mentega", "Roti", "Beras", "Kopi", "Apel", "Teh"]);

        let ids: HashSet<i64> = report.suggestions.iter().map(|s| s.product.id).collect();
        assert_eq!(ids.len(), report.suggestions.len());

        assert_eq!(
            report.stats,
            SuggestionStats {
                expired_count: 2,
                out_of_stock_count: 1,
                low_stock_count: 1,
                expiring_count: 2,
                total_count: 6,
            }
        );
    }

    #[test]
    fn names_sort_alphabetically_before_case() {
        let products = vec![
            product(1, "beras", d(0), d(1), None),
            product(2, "Gula", d(0), d(1), None),
            product(3, "gula", d(0), d(1), None),
            product(4, "Apel", d(0), d(1), None),
        ];
        let report = build_suggestions(&products, today());
        let order: Vec<&str> = report
            .suggestions
            .iter()
            .map(|s| s.product.name.as_str())
            .collect();
        assert_eq!(order, vec!["Apel", "beras", "gula", "Gula"]);
    }

    #[test]
    fn aggregation_is_idempotent() {
        let products = vec![
            product(1, "Teh", d(10), d(2), Some(5)),
            product(2, "Beras", d(1), d(2), Some(-1)),
            product(3, "Kopi", d(0), d(1), None),
        ];
        assert_eq!(
            build_suggestions(&products, today()),
            build_suggestions(&products, today())
        );
    }

    #[test]
    fn suggestion_serializes_with_product_fields() {
        let report = build_suggestions(&[product(4, "Keju", d(10), d(2), Some(3))], today());
        let json = serde_json::to_value(&report.suggestions[0]).unwrap();
        assert_eq!(json["id"], 4);
        assert_eq!(json["name"], "Keju");
        assert_eq!(json["stock_quantity"], 10.0);
        assert_eq!(json["type"], "expiring");
        assert_eq!(json["alertText"], "Hampir Kadaluarsa!");
        assert_eq!(json["buttonText"], "Gunakan");
        assert_eq!(json["daysLeft"], 3);
        assert!(json.get("isExpired").is_none());
    }

    // ---
    // Service against the in-memory store
    // ---

    fn service(store: &Arc<MemoryStore>) -> SuggestionService {
        SuggestionService::new(store.clone(), store.clone())
    }

    #[tokio::test]
    async fn service_only_reads_the_callers_products() {
        let store = Arc::new(MemoryStore::default());
        store.put(product(1, "Beras", d(0), d(2), None));
        let mut other = product(2, "Kopi", d(0), d(2), None);
        other.user_id = 2;
        store.put(other);

        let report = service(&store).get_suggestions(1, today()).await.unwrap();
        assert_eq!(report.stats.total_count, 1);
        assert_eq!(report.suggestions[0].product.id, 1);
    }

    #[tokio::test]
    async fn approving_low_stock_sets_stock_and_expiry() {
        let store = Arc::new(MemoryStore::default());
        store.put(product(1, "Beras", d(0), d(2), Some(-2)));

        let expiry = today() + Duration::days(60);
        let updated = service(&store)
            .approve(
                1,
                ApproveSuggestionPayload {
                    product_id: Some(1),
                    kind: "low-stock".to_string(),
                    new_stock: Some(d(5)),
                    expiry_date: Some(expiry),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.stock_quantity, d(5));
        assert_eq!(updated.expiry_date, Some(expiry));
        assert_eq!(store.activity_actions(), vec!["suggestion.approve".to_string()]);

        let report = service(&store).get_suggestions(1, today()).await.unwrap();
        assert!(report.suggestions.is_empty());
    }

    #[tokio::test]
    async fn approving_expiring_zeroes_stock_only() {
        let store = Arc::new(MemoryStore::default());
        store.put(product(1, "Susu", d(3), d(1), Some(2)));

        let updated = service(&store)
            .approve(
                1,
                ApproveSuggestionPayload {
                    product_id: Some(1),
                    kind: "expiring".to_string(),
                    new_stock: None,
                    expiry_date: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.stock_quantity, Decimal::ZERO);
        assert_eq!(updated.expiry_date, Some(today() + Duration::days(2)));
    }

    #[tokio::test]
    async fn approving_someone_elses_product_is_not_found() {
        let store = Arc::new(MemoryStore::default());
        store.put(product(1, "Susu", d(3), d(1), Some(2)));

        let err = service(&store)
            .approve(
                2,
                ApproveSuggestionPayload {
                    product_id: Some(1),
                    kind: "expiring".to_string(),
                    new_stock: None,
                    expiry_date: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::ProductNotFound));
        assert!(store.activity_actions().is_empty());
    }

    #[tokio::test]
    async fn approving_unknown_type_touches_nothing() {
        let store = Arc::new(MemoryStore::default());
        store.put(product(1, "Susu", d(3), d(1), Some(2)));

        let err = service(&store)
            .approve(
                1,
                ApproveSuggestionPayload {
                    product_id: Some(1),
                    kind: "discard".to_string(),
                    new_stock: None,
                    expiry_date: None,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidSuggestionType(_)));
        assert_eq!(store.get(1).unwrap().stock_quantity, d(3));
    }
}
