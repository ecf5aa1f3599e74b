use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ingredient::entities::NutritionFacts;

#[derive(Debug, Clone)]
pub struct AnalyzeIngredientsInput {
    pub user_id: Uuid,
    pub ingredients_list: Vec<String>,
    pub product_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AnalyzeProductInput {
    pub ingredients_list: Vec<String>,
    pub nutrition_facts: Option<NutritionFacts>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ExtractedIngredients {
    pub extracted_text: String,
    pub ingredients_list: Vec<String>,
}
