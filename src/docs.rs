// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,

        // --- Users ---
        handlers::auth::get_me,

        // --- Products ---
        handlers::products::list_products,
        handlers::products::get_product,
        handlers::products::create_product,
        handlers::products::update_product,
        handlers::products::delete_product,

        // --- Suggestions ---
        handlers::suggestions::get_suggestions,
        handlers::suggestions::get_suggestion_stats,
        handlers::suggestions::approve_suggestion,

        // --- Notes ---
        handlers::notes::list_notes,
        handlers::notes::create_note,
        handlers::notes::update_note,
        handlers::notes::delete_note,

        // --- Dashboard ---
        handlers::dashboard::get_summary,

        // --- Admin ---
        handlers::admin::get_overview,
        handlers::admin::list_users,
        handlers::admin::update_user,
        handlers::admin::delete_user,
        handlers::admin::list_products,
        handlers::admin::delete_product,
        handlers::admin::list_activity_logs,
        handlers::admin::purge_activity_logs,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,
            models::auth::UpdateUserPayload,
            models::auth::UserCounts,

            // --- Products ---
            models::product::Product,
            models::product::ProductWithOwner,
            models::product::ProductPayload,
            models::product::ExpiryStatus,
            models::product::StatusFilter,
            services::stock::StockLevel,
            services::stock::InventoryCounts,

            // --- Suggestions ---
            models::suggestion::SuggestionType,
            models::suggestion::SuggestionColor,
            models::suggestion::Suggestion,
            models::suggestion::SuggestionStats,
            models::suggestion::SuggestionsResponse,
            models::suggestion::SuggestionStatsResponse,
            models::suggestion::ApproveSuggestionPayload,
            models::suggestion::ApproveSuggestionResponse,

            // --- Notes ---
            models::note::Note,
            models::note::NotePayload,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,
            models::dashboard::ExpiryEntry,
            models::dashboard::AdminOverview,

            // --- Activity ---
            models::activity::ActivityLog,
            models::activity::ActivityLogEntry,
            models::activity::PurgeResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Pendaftaran dan login"),
        (name = "Users", description = "Profil pengguna"),
        (name = "Products", description = "Stok barang rumah tangga"),
        (name = "Suggestions", description = "Saran belanja dari stok dan tanggal kadaluarsa"),
        (name = "Notes", description = "Catatan belanja"),
        (name = "Dashboard", description = "Ringkasan beranda"),
        (name = "Admin", description = "Panel admin")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
