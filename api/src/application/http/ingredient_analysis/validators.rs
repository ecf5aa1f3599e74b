use labelsense_core::domain::ingredient::entities::NutritionFacts;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const MAX_INGREDIENTS: usize = 200;
const MAX_INGREDIENT_NAME_LENGTH: usize = 255;

fn validate_ingredient_names(names: &[String]) -> Result<(), ValidationError> {
    if names.iter().all(|name| name.trim().is_empty()) {
        return Err(ValidationError::new("blank_ingredients")
            .with_message("ingredients_list must contain at least one non-blank name".into()));
    }

    if names
        .iter()
        .any(|name| name.chars().count() > MAX_INGREDIENT_NAME_LENGTH)
    {
        return Err(ValidationError::new("ingredient_too_long")
            .with_message("ingredient names must be at most 255 characters".into()));
    }

    Ok(())
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct AnalyzeIngredientsRequest {
    pub user_id: Uuid,
    #[validate(
        length(
            min = 1,
            max = 200,
            message = "ingredients_list must contain between 1 and 200 ingredients"
        ),
        custom(function = "validate_ingredient_names")
    )]
    #[schema(example = json!(["Sugar", "Peanut Oil", "Salt"]))]
    pub ingredients_list: Vec<String>,
    #[validate(length(max = 255, message = "product_name must be at most 255 characters"))]
    pub product_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Validate)]
pub struct AnalyzeProductRequest {
    #[validate(
        length(
            min = 1,
            max = 200,
            message = "ingredients_list must contain between 1 and 200 ingredients"
        ),
        custom(function = "validate_ingredient_names")
    )]
    pub ingredients_list: Vec<String>,
    #[schema(example = json!({"sodium": "480mg"}))]
    pub nutrition_facts: Option<NutritionFacts>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(ingredients: &[&str]) -> AnalyzeIngredientsRequest {
        AnalyzeIngredientsRequest {
            user_id: Uuid::new_v4(),
            ingredients_list: ingredients.iter().map(|s| s.to_string()).collect(),
            product_name: None,
        }
    }

    #[test]
    fn test_accepts_regular_list() {
        assert!(request(&["Sugar", "Salt"]).validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_list() {
        let errors = request(&[]).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("ingredients_list"));
    }

    #[test]
    fn test_rejects_blank_only_list() {
        assert!(request(&["  ", ""]).validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_name() {
        let long = "a".repeat(300);
        assert!(request(&[long.as_str()]).validate().is_err());
    }

    #[test]
    fn test_rejects_too_many_ingredients() {
        let names = vec!["salt"; MAX_INGREDIENTS + 1];
        assert!(request(&names).validate().is_err());
    }

    #[test]
    fn test_product_request_deserializes_nutrition_facts() {
        let payload: AnalyzeProductRequest = serde_json::from_str(
            r#"{"ingredients_list": ["Salt"], "nutrition_facts": {"sodium": "480mg"}}"#,
        )
        .unwrap();

        assert!(payload.validate().is_ok());
        assert_eq!(
            payload.nutrition_facts.unwrap().0.get("sodium").map(String::as_str),
            Some("480mg")
        );
    }
}
