pub mod activity;
pub mod auth;
pub mod dashboard;
pub mod note;
pub mod product;
pub mod suggestion;
