use crate::{domain::personalization::entities::HealthProfile, entity::health_profiles};

impl From<&health_profiles::Model> for HealthProfile {
    fn from(model: &health_profiles::Model) -> Self {
        Self {
            age_group: model.age_group.clone(),
            allergies: model.allergies.clone(),
            conditions: model.health_conditions.clone(),
            preferences: model.dietary_preferences.clone(),
        }
    }
}

impl From<health_profiles::Model> for HealthProfile {
    fn from(model: health_profiles::Model) -> Self {
        Self::from(&model)
    }
}
