use tracing::error;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        ingredient::entities::{Concern, IngredientRecord},
    },
    entity::ingredients,
};

impl TryFrom<&ingredients::Model> for IngredientRecord {
    type Error = CoreError;

    fn try_from(model: &ingredients::Model) -> Result<Self, Self::Error> {
        let concerns: Vec<Concern> =
            serde_json::from_value(model.concerns.clone()).map_err(|e| {
                error!(
                    "Stored concerns for ingredient {} are unreadable: {}",
                    model.ingredient_name, e
                );
                CoreError::InternalServerError
            })?;

        Ok(Self {
            name: model.ingredient_name.clone(),
            kind: model.kind.clone(),
            tags: model.tags.iter().cloned().collect(),
            concerns,
            last_analyzed: model.last_analyzed.to_utc(),
        })
    }
}

impl TryFrom<ingredients::Model> for IngredientRecord {
    type Error = CoreError;

    fn try_from(model: ingredients::Model) -> Result<Self, Self::Error> {
        Self::try_from(&model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ingredient::entities::Severity;
    use chrono::Utc;
    use serde_json::json;

    fn model(concerns: serde_json::Value) -> ingredients::Model {
        let now = Utc::now().fixed_offset();
        ingredients::Model {
            ingredient_name: "sugar".to_string(),
            kind: "sweetener".to_string(),
            tags: vec!["high_sugar".to_string(), "natural".to_string()],
            concerns,
            last_analyzed: now,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_model_maps_to_record() {
        let record = IngredientRecord::try_from(model(json!([
            { "condition": "Diabetes", "level": "HIGH" }
        ])))
        .unwrap();

        assert_eq!(record.name, "sugar");
        assert!(record.tags.contains("natural"));
        assert_eq!(record.concerns[0].severity, Severity::High);
    }

    #[test]
    fn test_unreadable_concerns_are_rejected() {
        let result = IngredientRecord::try_from(model(json!({ "condition": 3 })));
        assert_eq!(result, Err(CoreError::InternalServerError));
    }
}
