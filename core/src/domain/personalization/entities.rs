use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ingredient::entities::Severity;

/// A consumer's health profile as seen by the personalization engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthProfile {
    #[serde(default)]
    pub age_group: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(rename = "health_conditions", default)]
    pub conditions: Vec<String>,
    #[serde(rename = "dietary_preferences", default)]
    pub preferences: Vec<String>,
}

/// Which part of the profile a condition label came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileSource {
    Allergy,
    HealthCondition,
    DietaryPreference,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileCondition {
    pub label: String,
    pub source: ProfileSource,
}

impl HealthProfile {
    /// Allergies, then health conditions, then dietary preferences.
    ///
    /// A label listed under several subsets appears once, attributed to the
    /// first subset in that order.
    pub fn all_conditions(&self) -> Vec<ProfileCondition> {
        let mut seen = HashSet::new();
        let subsets = [
            (&self.allergies, ProfileSource::Allergy),
            (&self.conditions, ProfileSource::HealthCondition),
            (&self.preferences, ProfileSource::DietaryPreference),
        ];

        subsets
            .into_iter()
            .flat_map(|(labels, source)| labels.iter().map(move |label| (label, source)))
            .filter(|(label, _)| seen.insert(label.as_str()))
            .map(|(label, source)| ProfileCondition {
                label: label.clone(),
                source,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum WarningType {
    Allergy,
    HealthCondition,
    DietaryPreference,
    General,
}

impl From<ProfileSource> for WarningType {
    fn from(source: ProfileSource) -> Self {
        match source {
            ProfileSource::Allergy => WarningType::Allergy,
            ProfileSource::HealthCondition => WarningType::HealthCondition,
            ProfileSource::DietaryPreference => WarningType::DietaryPreference,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Warning {
    pub ingredient: String,
    pub condition: String,
    #[serde(rename = "level")]
    pub severity: Severity,
    pub message: String,
    #[serde(rename = "type")]
    pub warning_type: WarningType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum VerdictStatus {
    Good,
    MinorConcerns,
    Caution,
    NotRecommended,
}

/// Aggregate assessment derived from a warning list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Verdict {
    pub status: VerdictStatus,
    pub message: String,
    pub color: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_conditions_order_and_dedup() {
        let profile = HealthProfile {
            age_group: None,
            allergies: vec!["Peanuts".to_string()],
            conditions: vec!["Hypertension".to_string(), "Peanuts".to_string()],
            preferences: vec!["Vegan".to_string()],
        };

        let conditions = profile.all_conditions();

        assert_eq!(conditions.len(), 3);
        assert_eq!(conditions[0].label, "Peanuts");
        assert_eq!(conditions[0].source, ProfileSource::Allergy);
        assert_eq!(conditions[1].source, ProfileSource::HealthCondition);
        assert_eq!(conditions[2].source, ProfileSource::DietaryPreference);
    }
}
