use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::personalization::entities::{Verdict, Warning};

pub const UNKNOWN_PRODUCT: &str = "Unknown Product";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzedIngredient {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub tags: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProfileSummary {
    pub age_group: Option<String>,
    pub allergies_count: usize,
    pub conditions_count: usize,
    pub preferences_count: usize,
}

/// Personalized assessment of one product's ingredient list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Report {
    pub product_name: String,
    pub overall_summary: Verdict,
    pub warnings: Vec<Warning>,
    pub ingredients_analyzed: Vec<AnalyzedIngredient>,
    pub total_ingredients: usize,
    pub analysis_timestamp: DateTime<Utc>,
    pub user_profile_summary: ProfileSummary,
}
