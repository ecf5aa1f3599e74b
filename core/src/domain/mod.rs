pub mod analysis;
pub mod common;
pub mod health;
pub mod health_profile;
pub mod ingredient;
pub mod personalization;
pub mod report;
