use chrono::Utc;

use crate::domain::{
    ingredient::value_objects::ResolvedIngredient,
    personalization::{
        entities::{HealthProfile, Warning},
        services::summarize,
    },
    report::entities::{AnalyzedIngredient, ProfileSummary, Report, UNKNOWN_PRODUCT},
};

pub fn assemble_report(
    product_name: Option<String>,
    ingredients: &[ResolvedIngredient],
    profile: &HealthProfile,
    warnings: Vec<Warning>,
) -> Report {
    let product_name = product_name
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN_PRODUCT.to_string());

    let ingredients_analyzed = ingredients
        .iter()
        .map(|ingredient| AnalyzedIngredient {
            name: ingredient.name.clone(),
            kind: ingredient.record.kind.clone(),
            tags: ingredient.record.tags.clone(),
        })
        .collect();

    Report {
        product_name,
        overall_summary: summarize(&warnings),
        warnings,
        ingredients_analyzed,
        total_ingredients: ingredients.len(),
        analysis_timestamp: Utc::now(),
        user_profile_summary: ProfileSummary {
            age_group: profile.age_group.clone(),
            allergies_count: profile.allergies.len(),
            conditions_count: profile.conditions.len(),
            preferences_count: profile.preferences.len(),
        },
    }
}
