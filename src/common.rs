pub mod collation;
pub mod error;
pub mod pagination;
pub mod thresholds;
