pub mod db;
pub mod health;
pub mod health_profile;
pub mod ingredient;
pub mod llm;
