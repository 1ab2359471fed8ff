pub mod auth;
pub mod dashboard_service;
pub mod product_service;
pub mod stock;
pub mod suggestion_service;
