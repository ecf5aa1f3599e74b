use tracing::debug;

use crate::domain::{
    ingredient::{entities::Severity, value_objects::ResolvedIngredient},
    personalization::{
        entities::{
            HealthProfile, ProfileCondition, ProfileSource, Verdict, VerdictStatus, Warning,
        },
        rules::{ConflictRule, ConflictRuleSet, MatchMode},
    },
};

/// Cross-references resolved ingredients with a health profile.
///
/// Pure and synchronous: the same inputs always give the same warnings.
#[derive(Debug, Clone, Default)]
pub struct PersonalizationEngine {
    rules: ConflictRuleSet,
    match_mode: MatchMode,
}

impl PersonalizationEngine {
    pub fn new(rules: ConflictRuleSet, match_mode: MatchMode) -> Self {
        Self { rules, match_mode }
    }

    pub fn with_match_mode(match_mode: MatchMode) -> Self {
        Self::new(ConflictRuleSet::default(), match_mode)
    }

    /// Every conflict between the ingredients and the profile, most severe first.
    pub fn analyze_conflicts(
        &self,
        profile: &HealthProfile,
        ingredients: &[ResolvedIngredient],
    ) -> Vec<Warning> {
        let conditions = profile.all_conditions();
        let mut warnings = Vec::new();

        for ingredient in ingredients {
            // Degraded entries carry no usable metadata.
            if ingredient.record.is_fallback() {
                continue;
            }

            for condition in &conditions {
                let Some(rule) = self.rules.get(&condition.label) else {
                    continue;
                };

                if let Some(warning) = self.evaluate(condition, rule, ingredient) {
                    warnings.push(warning);
                }
            }
        }

        debug!(count = warnings.len(), "personalization warnings generated");
        rank_warnings(&mut warnings);
        warnings
    }

    fn evaluate(
        &self,
        condition: &ProfileCondition,
        rule: &ConflictRule,
        ingredient: &ResolvedIngredient,
    ) -> Option<Warning> {
        let record = &ingredient.record;

        let tag_conflict = rule.match_tags.iter().any(|rule_tag| {
            record
                .tags
                .iter()
                .any(|tag| self.match_mode.matches(tag, rule_tag))
        });

        let concern_conflict = record.concerns.iter().find(|concern| {
            rule.match_concern_labels
                .iter()
                .any(|label| self.match_mode.matches(&concern.condition, label))
        });

        if !tag_conflict && concern_conflict.is_none() {
            return None;
        }

        let severity = if condition.source == ProfileSource::Allergy {
            Severity::High
        } else if let Some(concern) = concern_conflict {
            concern.severity
        } else {
            Severity::Medium
        };

        Some(Warning {
            ingredient: ingredient.name.clone(),
            condition: condition.label.clone(),
            severity,
            message: format!("{}: {}", ingredient.name, rule.message),
            warning_type: condition.source.into(),
        })
    }
}

/// Stable sort by severity, most severe first; ties keep discovery order.
pub fn rank_warnings(warnings: &mut [Warning]) {
    warnings.sort_by(|a, b| b.severity.cmp(&a.severity));
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

/// Aggregate verdict for a warning list. Depends on nothing else.
pub fn summarize(warnings: &[Warning]) -> Verdict {
    if warnings.is_empty() {
        return Verdict {
            status: VerdictStatus::Good,
            message: "This product appears suitable for your health profile.".to_string(),
            color: "green".to_string(),
        };
    }

    let high = warnings
        .iter()
        .filter(|w| w.severity == Severity::High)
        .count();
    let medium = warnings
        .iter()
        .filter(|w| w.severity == Severity::Medium)
        .count();
    let total = warnings.len();

    if high > 0 {
        Verdict {
            status: VerdictStatus::NotRecommended,
            message: format!(
                "Not recommended - contains {high} serious concern{} for your health profile.",
                plural(high)
            ),
            color: "red".to_string(),
        }
    } else if medium > 2 {
        Verdict {
            status: VerdictStatus::Caution,
            message: format!(
                "Use caution - contains {total} ingredient{} that may conflict with your health profile.",
                plural(total)
            ),
            color: "orange".to_string(),
        }
    } else {
        Verdict {
            status: VerdictStatus::MinorConcerns,
            message: format!(
                "Generally okay - minor concerns with {total} ingredient{}.",
                plural(total)
            ),
            color: "yellow".to_string(),
        }
    }
}
