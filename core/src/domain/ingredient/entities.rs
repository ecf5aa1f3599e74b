use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ingredient::errors::EnrichmentError;

pub const FALLBACK_KIND: &str = "unknown";
pub const FALLBACK_TAG: &str = "unanalyzed";

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[serde(alias = "low", alias = "Low")]
    Low,
    #[default]
    #[serde(alias = "medium", alias = "Medium")]
    Medium,
    #[serde(alias = "high", alias = "High")]
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LOW" => Ok(Severity::Low),
            "MEDIUM" => Ok(Severity::Medium),
            "HIGH" => Ok(Severity::High),
            other => Err(format!("unknown severity level: {other}")),
        }
    }
}

/// A health condition an ingredient may affect, with how strongly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Concern {
    pub condition: String,
    #[serde(rename = "level", default)]
    pub severity: Severity,
}

impl Concern {
    pub fn new(condition: impl Into<String>, severity: Severity) -> Self {
        Self {
            condition: condition.into(),
            severity,
        }
    }
}

/// Structured analysis of one ingredient as produced by enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngredientAnalysis {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(rename = "potential_concerns", default)]
    pub concerns: Vec<Concern>,
}

impl IngredientAnalysis {
    pub fn new<I, S>(kind: impl Into<String>, tags: I, concerns: Vec<Concern>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: kind.into(),
            tags: tags.into_iter().map(Into::into).collect(),
            concerns,
        }
    }

    /// Checks the analysis is complete enough to be cached and brings tags
    /// into canonical form (trimmed, lower-cased, deduplicated).
    pub fn validated(self) -> Result<Self, EnrichmentError> {
        let kind = self.kind.trim().to_string();
        if kind.is_empty() {
            return Err(EnrichmentError::Validation("empty ingredient type".to_string()));
        }

        let mut tags = BTreeSet::new();
        for tag in self.tags {
            let tag = tag.trim().to_lowercase();
            if tag.is_empty() {
                return Err(EnrichmentError::Validation("blank tag".to_string()));
            }
            tags.insert(tag);
        }

        let mut concerns = Vec::with_capacity(self.concerns.len());
        for concern in self.concerns {
            let condition = concern.condition.trim().to_string();
            if condition.is_empty() {
                return Err(EnrichmentError::Validation(
                    "concern without a condition".to_string(),
                ));
            }
            concerns.push(Concern::new(condition, concern.severity));
        }

        Ok(Self {
            kind,
            tags,
            concerns,
        })
    }
}

/// Cached knowledge about an ingredient, keyed by its normalized name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngredientRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub tags: BTreeSet<String>,
    #[serde(rename = "potential_concerns", default)]
    pub concerns: Vec<Concern>,
    pub last_analyzed: DateTime<Utc>,
}

impl IngredientRecord {
    pub fn from_analysis(name: impl Into<String>, analysis: IngredientAnalysis) -> Self {
        Self {
            name: name.into(),
            kind: analysis.kind,
            tags: analysis.tags,
            concerns: analysis.concerns,
            last_analyzed: Utc::now(),
        }
    }

    /// Placeholder used when enrichment fails. Never persisted.
    pub fn fallback(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FALLBACK_KIND.to_string(),
            tags: BTreeSet::from([FALLBACK_TAG.to_string()]),
            concerns: Vec::new(),
            last_analyzed: Utc::now(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.kind == FALLBACK_KIND
            && self.concerns.is_empty()
            && self.tags.len() == 1
            && self.tags.contains(FALLBACK_TAG)
    }
}

/// Optional nutrition panel values keyed by label, e.g. `"sodium" -> "480mg"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct NutritionFacts(pub BTreeMap<String, String>);

impl NutritionFacts {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ItemizedIngredient {
    pub ingredient_name: String,
    #[serde(flatten)]
    pub analysis: IngredientAnalysis,
}

/// Holistic, product-level analysis of a whole ingredient list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductAnalysis {
    pub items: Vec<ItemizedIngredient>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validated_normalizes_tags() {
        let analysis = IngredientAnalysis::new(
            " sweetener ",
            ["High_Sugar", "high_sugar ", "natural"],
            vec![Concern::new(" Diabetes ", Severity::High)],
        )
        .validated()
        .unwrap();

        assert_eq!(analysis.kind, "sweetener");
        assert_eq!(
            analysis.tags.iter().cloned().collect::<Vec<_>>(),
            vec!["high_sugar".to_string(), "natural".to_string()]
        );
        assert_eq!(analysis.concerns[0].condition, "Diabetes");
    }

    #[test]
    fn test_validated_rejects_empty_kind() {
        let result = IngredientAnalysis::new("  ", ["natural"], vec![]).validated();
        assert!(matches!(result, Err(EnrichmentError::Validation(_))));
    }

    #[test]
    fn test_validated_rejects_blank_concern() {
        let result =
            IngredientAnalysis::new("salt", ["high_sodium"], vec![Concern::new("", Severity::Low)])
                .validated();
        assert!(matches!(result, Err(EnrichmentError::Validation(_))));
    }

    #[test]
    fn test_concern_level_defaults_to_medium() {
        let analysis: IngredientAnalysis = serde_json::from_str(
            r#"{"type":"additive","tags":["processed"],"potential_concerns":[{"condition":"Hypertension"}]}"#,
        )
        .unwrap();
        assert_eq!(analysis.concerns[0].severity, Severity::Medium);
    }

    #[test]
    fn test_fallback_record_shape() {
        let record = IngredientRecord::fallback("xylitol");
        assert_eq!(record.kind, "unknown");
        assert!(record.tags.contains("unanalyzed"));
        assert!(record.concerns.is_empty());
        assert!(record.is_fallback());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
        assert_eq!("high".parse::<Severity>().unwrap(), Severity::High);
    }
}
