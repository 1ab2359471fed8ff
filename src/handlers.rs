pub mod admin;
pub mod auth;
pub mod dashboard;
pub mod notes;
pub mod products;
pub mod suggestions;

use chrono::NaiveDate;

use crate::{config::AppState, models::activity::NewActivity};

/// The server's local calendar date; classification compares dates only.
pub(crate) fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Activity logging never fails the request it describes.
pub(crate) async fn record_activity(app_state: &AppState, entry: NewActivity) {
    if let Err(e) = app_state.activity.record(entry).await {
        tracing::warn!("Failed to record activity: {}", e);
    }
}
