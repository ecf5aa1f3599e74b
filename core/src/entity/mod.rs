pub mod prelude;

pub mod health_profiles;
pub mod ingredients;
