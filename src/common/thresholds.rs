//! Stock and expiry thresholds shared by suggestions, the dashboard, product
//! filters and the admin overview. There is no other definition of "low stock"
//! or "expiring soon" in the service.

use rust_decimal::Decimal;

/// Stock at or below this level is out of stock.
pub const OUT_OF_STOCK_LEVEL: Decimal = Decimal::ZERO;

/// A dated product expiring within this many days (inclusive, today counts as 0)
/// is expiring soon.
pub const EXPIRING_SOON_DAYS: i64 = 7;

/// Entries shown in the dashboard "upcoming expiries" and "recent activity" lists.
pub const DASHBOARD_LIST_LIMIT: usize = 5;

/// Largest stock quantity or minimum level a `NUMERIC(12, 2)` column holds.
pub const MAX_QUANTITY: Decimal = Decimal::from_parts(0xD4A5_0FFF, 0xE8, 0, false, 2);

/// Decimal places kept for quantities.
pub const QUANTITY_SCALE: u32 = 2;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Default retention used when an admin purges activity logs without an age.
pub const DEFAULT_LOG_RETENTION_DAYS: i64 = 30;

/// Upper bound accepted for `JWT_TTL_DAYS`.
pub const MAX_TOKEN_TTL_DAYS: i64 = 3650;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_quantity_fills_the_column() {
        assert_eq!(MAX_QUANTITY, Decimal::new(999_999_999_999, QUANTITY_SCALE));
    }
}
