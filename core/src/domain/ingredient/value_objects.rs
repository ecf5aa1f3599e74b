use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::ingredient::entities::IngredientRecord;

/// Cache key form of an ingredient name: trimmed and lower-cased.
pub fn normalize_ingredient_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// An ingredient as the caller spelled it, paired with its resolved record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedIngredient {
    pub name: String,
    pub record: IngredientRecord,
}

impl ResolvedIngredient {
    pub fn new(name: impl Into<String>, record: IngredientRecord) -> Self {
        Self {
            name: name.into(),
            record,
        }
    }
}

/// How cache misses are sent to the enrichment client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionStrategy {
    /// One enrichment call per missing ingredient.
    #[default]
    PerIngredient,
    /// One batch call for all misses, individual retries for what it left out.
    Batched,
}

impl fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionStrategy::PerIngredient => f.write_str("per-ingredient"),
            ResolutionStrategy::Batched => f.write_str("batched"),
        }
    }
}

impl FromStr for ResolutionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "per-ingredient" | "per_ingredient" => Ok(ResolutionStrategy::PerIngredient),
            "batched" | "batch" => Ok(ResolutionStrategy::Batched),
            other => Err(format!("unknown resolution strategy: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_ingredient_name() {
        assert_eq!(normalize_ingredient_name("  Peanut Oil \n"), "peanut oil");
        assert_eq!(normalize_ingredient_name("SALT"), "salt");
    }

    #[test]
    fn test_resolution_strategy_parse() {
        assert_eq!(
            "batched".parse::<ResolutionStrategy>().unwrap(),
            ResolutionStrategy::Batched
        );
        assert_eq!(
            "Per-Ingredient".parse::<ResolutionStrategy>().unwrap(),
            ResolutionStrategy::PerIngredient
        );
        assert!("sometimes".parse::<ResolutionStrategy>().is_err());
    }
}
