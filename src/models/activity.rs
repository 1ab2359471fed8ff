// src/models/activity.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use crate::common::pagination::PageParams;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow, ToSchema)]
pub struct ActivityLog {
    pub id: i64,
    pub user_id: Option<i64>,
    #[schema(example = "product.create")]
    pub action: String,
    pub entity_id: Option<i64>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Activity log row joined with the user who performed it.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct ActivityLogEntry {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub log: ActivityLog,
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityAction {
    Register,
    Login,
    ProductCreate,
    ProductUpdate,
    ProductDelete,
    SuggestionApprove,
    NoteCreate,
    NoteUpdate,
    NoteDelete,
    AdminUserUpdate,
    AdminUserDelete,
    AdminProductDelete,
    AdminLogPurge,
}

impl ActivityAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ActivityAction::Register => "auth.register",
            ActivityAction::Login => "auth.login",
            ActivityAction::ProductCreate => "product.create",
            ActivityAction::ProductUpdate => "product.update",
            ActivityAction::ProductDelete => "product.delete",
            ActivityAction::SuggestionApprove => "suggestion.approve",
            ActivityAction::NoteCreate => "note.create",
            ActivityAction::NoteUpdate => "note.update",
            ActivityAction::NoteDelete => "note.delete",
            ActivityAction::AdminUserUpdate => "admin.user.update",
            ActivityAction::AdminUserDelete => "admin.user.delete",
            ActivityAction::AdminProductDelete => "admin.product.delete",
            ActivityAction::AdminLogPurge => "admin.log.purge",
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewActivity {
    pub user_id: Option<i64>,
    pub action: ActivityAction,
    pub entity_id: Option<i64>,
    pub description: String,
}

impl NewActivity {
    pub fn new(user_id: Option<i64>, action: ActivityAction, description: impl Into<String>) -> Self {
        Self {
            user_id,
            action,
            entity_id: None,
            description: description.into(),
        }
    }

    pub fn with_entity(mut self, entity_id: i64) -> Self {
        self.entity_id = Some(entity_id);
        self
    }
}

/// Query string of `GET /api/admin/activity-logs`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ActivityQuery {
    pub user_id: Option<i64>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ActivityQuery {
    pub fn page_params(&self) -> PageParams {
        PageParams { page: self.page, limit: self.limit }
    }
}

/// Query string of `DELETE /api/admin/activity-logs`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PurgeQuery {
    pub older_than_days: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PurgeResponse {
    pub success: bool,
    pub deleted: u64,
}
