use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{
    analysis::value_objects::ExtractedIngredients, common::entities::app_errors::CoreError,
    ingredient::entities::NutritionFacts,
};

pub const NO_INGREDIENTS_FOUND: &str = "NO_INGREDIENTS_FOUND";

static JSON_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid JSON object pattern"));

/// First-brace-to-last-brace slice of a model reply, skipping any prose or
/// markdown fences around the JSON.
pub fn extract_json_object(text: &str) -> Option<&str> {
    JSON_OBJECT.find(text).map(|m| m.as_str())
}

/// Splits the comma-separated ingredient text read off a label.
pub fn parse_ingredients_list(text: &str) -> Result<ExtractedIngredients, CoreError> {
    let extracted_text = text.trim();
    if extracted_text.is_empty() || extracted_text.eq_ignore_ascii_case(NO_INGREDIENTS_FOUND) {
        return Err(CoreError::NoIngredientsFound);
    }

    let ingredients_list: Vec<String> = extracted_text
        .split(',')
        .map(|ingredient| ingredient.trim())
        .filter(|ingredient| !ingredient.is_empty())
        .map(str::to_string)
        .collect();

    if ingredients_list.is_empty() {
        return Err(CoreError::NoIngredientsFound);
    }

    Ok(ExtractedIngredients {
        extracted_text: extracted_text.to_string(),
        ingredients_list,
    })
}

pub const INGREDIENT_EXTRACTION_PROMPT: &str = "From the image of this food label, extract only the text from the 'Ingredients' section. \
Put a single, comma-separated list of the ingredients in the \"ingredients_text\" field. \
If you cannot find an ingredients list, set it to the exact string \"NO_INGREDIENTS_FOUND\".";

pub fn ingredient_analysis_prompt(ingredient_name: &str) -> String {
    format!(
        r#"Provide a structured JSON data profile for the ingredient: "{ingredient_name}".
The JSON should have exactly these keys:
- "type": a brief category (e.g., "preservative", "sweetener", "protein", "carbohydrate", "fat", "vitamin", "mineral", "additive", "natural", "artificial")
- "tags": an array of relevant lowercase tags (e.g., ["gluten_free", "vegan", "contains_dairy", "artificial", "processed", "natural", "high_sodium", "high_sugar", "allergen"])
- "potential_concerns": an array of objects, each with "condition" and "level" keys, where level is "LOW", "MEDIUM", or "HIGH"

Return only valid JSON, no additional text or markdown formatting."#
    )
}

pub fn product_analysis_prompt(
    ingredient_names: &[String],
    nutrition_facts: Option<&NutritionFacts>,
) -> String {
    let nutrition = match nutrition_facts.filter(|facts| !facts.is_empty()) {
        Some(facts) => facts
            .0
            .iter()
            .map(|(label, value)| format!("- {label}: {value}"))
            .collect::<Vec<_>>()
            .join("\n"),
        None => "Not provided".to_string(),
    };

    format!(
        r#"Analyze this packaged food product ingredient by ingredient.
Ingredients: {ingredients}
Nutrition facts:
{nutrition}

Return a JSON object with:
- "items": one entry per listed ingredient, each with "ingredient_name" (exactly as listed), "type", "tags" (lowercase) and "potential_concerns" (objects with "condition" and "level" of "LOW", "MEDIUM" or "HIGH")
- "summary": a short overall assessment of the product

Return only valid JSON, no additional text or markdown formatting."#,
        ingredients = ingredient_names.join(", "),
    )
}
