pub use super::health_profiles::Entity as HealthProfiles;
pub use super::ingredients::Entity as Ingredients;
