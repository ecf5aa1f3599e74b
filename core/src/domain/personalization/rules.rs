use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What in an ingredient's metadata signals a conflict with one profile condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictRule {
    pub match_tags: Vec<String>,
    pub match_concern_labels: Vec<String>,
    pub message: String,
}

impl ConflictRule {
    pub fn new<T, S>(match_tags: T, message: impl Into<String>) -> Self
    where
        T: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            match_tags: match_tags.into_iter().map(Into::into).collect(),
            match_concern_labels: Vec::new(),
            message: message.into(),
        }
    }

    pub fn with_concern_labels<C, S>(mut self, labels: C) -> Self
    where
        C: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.match_concern_labels = labels.into_iter().map(Into::into).collect();
        self
    }
}

/// How an ingredient tag or concern is compared with a rule entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Either string contains the other, ignoring case.
    #[default]
    Substring,
    /// Equal ignoring case.
    Exact,
}

impl MatchMode {
    pub fn matches(&self, value: &str, rule_value: &str) -> bool {
        let value = value.to_lowercase();
        let rule_value = rule_value.to_lowercase();

        match self {
            MatchMode::Substring => value.contains(&rule_value) || rule_value.contains(&value),
            MatchMode::Exact => value == rule_value,
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Substring => f.write_str("substring"),
            MatchMode::Exact => f.write_str("exact"),
        }
    }
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "substring" => Ok(MatchMode::Substring),
            "exact" => Ok(MatchMode::Exact),
            other => Err(format!("unknown match mode: {other}")),
        }
    }
}

/// Conflict rules keyed by the exact profile label they apply to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictRuleSet {
    rules: HashMap<String, ConflictRule>,
}

impl ConflictRuleSet {
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    pub fn with_rule(mut self, condition: impl Into<String>, rule: ConflictRule) -> Self {
        self.rules.insert(condition.into(), rule);
        self
    }

    pub fn get(&self, condition: &str) -> Option<&ConflictRule> {
        self.rules.get(condition)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for ConflictRuleSet {
    fn default() -> Self {
        Self::empty()
            // Allergies
            .with_rule(
                "Milk/Dairy",
                ConflictRule::new(
                    ["contains_dairy", "milk", "lactose"],
                    "Contains dairy products - conflicts with your milk/dairy allergy",
                ),
            )
            .with_rule(
                "Eggs",
                ConflictRule::new(
                    ["contains_eggs", "egg"],
                    "Contains eggs - conflicts with your egg allergy",
                ),
            )
            .with_rule(
                "Peanuts",
                ConflictRule::new(
                    ["contains_peanuts", "peanut"],
                    "Contains peanuts - conflicts with your peanut allergy",
                ),
            )
            .with_rule(
                "Tree Nuts",
                ConflictRule::new(
                    ["contains_nuts", "tree_nuts", "almond", "walnut", "cashew"],
                    "Contains tree nuts - conflicts with your tree nut allergy",
                ),
            )
            .with_rule(
                "Fish",
                ConflictRule::new(
                    ["contains_fish", "fish"],
                    "Contains fish - conflicts with your fish allergy",
                ),
            )
            .with_rule(
                "Shellfish",
                ConflictRule::new(
                    ["contains_shellfish", "shellfish"],
                    "Contains shellfish - conflicts with your shellfish allergy",
                ),
            )
            .with_rule(
                "Wheat/Gluten",
                ConflictRule::new(
                    ["contains_gluten", "wheat", "gluten"],
                    "Contains gluten/wheat - conflicts with your gluten allergy",
                ),
            )
            .with_rule(
                "Soy",
                ConflictRule::new(
                    ["contains_soy", "soy"],
                    "Contains soy - conflicts with your soy allergy",
                ),
            )
            .with_rule(
                "Sesame",
                ConflictRule::new(
                    ["contains_sesame", "sesame"],
                    "Contains sesame - conflicts with your sesame allergy",
                ),
            )
            .with_rule(
                "Sulfites",
                ConflictRule::new(
                    ["contains_sulfites", "sulfites"],
                    "Contains sulfites - conflicts with your sulfite sensitivity",
                ),
            )
            // Health conditions
            .with_rule(
                "Type 2 Diabetes",
                ConflictRule::new(
                    ["high_sugar", "artificial_sweetener", "high_carb"],
                    "May affect blood sugar levels - consider your diabetes management",
                )
                .with_concern_labels(["Diabetes"]),
            )
            .with_rule(
                "Hypertension",
                ConflictRule::new(
                    ["high_sodium", "salt"],
                    "High sodium content - may affect your blood pressure",
                )
                .with_concern_labels(["Hypertension", "High Blood Pressure"]),
            )
            .with_rule(
                "Cardiovascular Disease",
                ConflictRule::new(
                    ["high_saturated_fat", "trans_fat", "high_cholesterol"],
                    "May contain ingredients that affect heart health",
                )
                .with_concern_labels(["Heart Disease", "Cardiovascular Disease"]),
            )
            .with_rule(
                "Celiac Disease",
                ConflictRule::new(
                    ["contains_gluten", "wheat", "gluten"],
                    "Contains gluten - strictly avoid with celiac disease",
                )
                .with_concern_labels(["Celiac Disease"]),
            )
            .with_rule(
                "High Cholesterol",
                ConflictRule::new(
                    ["high_cholesterol", "saturated_fat"],
                    "May affect cholesterol levels",
                )
                .with_concern_labels(["High Cholesterol"]),
            )
            .with_rule(
                "Chronic Kidney Disease",
                ConflictRule::new(
                    ["high_sodium", "high_protein", "phosphorus"],
                    "May contain ingredients to limit with kidney disease",
                )
                .with_concern_labels(["Kidney Disease"]),
            )
            .with_rule(
                "GERD/Acid Reflux",
                ConflictRule::new(
                    ["acidic", "spicy", "citric_acid"],
                    "May trigger acid reflux symptoms",
                )
                .with_concern_labels(["GERD", "Acid Reflux"]),
            )
            .with_rule(
                "Fatty Liver Disease",
                ConflictRule::new(
                    ["high_sugar", "high_fructose", "refined_carbs"],
                    "High sugar content may worsen fatty liver condition",
                )
                .with_concern_labels(["Fatty Liver"]),
            )
            .with_rule(
                "Osteoporosis",
                ConflictRule::new(
                    ["high_sodium", "phosphoric_acid"],
                    "May affect calcium absorption and bone health",
                )
                .with_concern_labels(["Bone Health"]),
            )
            // Dietary preferences
            .with_rule(
                "Vegetarian",
                ConflictRule::new(
                    ["contains_meat", "animal_derived"],
                    "Contains animal-derived ingredients - not suitable for vegetarian diet",
                ),
            )
            .with_rule(
                "Vegan",
                ConflictRule::new(
                    [
                        "contains_meat",
                        "contains_dairy",
                        "contains_eggs",
                        "animal_derived",
                        "honey",
                    ],
                    "Contains animal-derived ingredients - not suitable for vegan diet",
                ),
            )
            .with_rule(
                "Keto Diet",
                ConflictRule::new(
                    ["high_carb", "high_sugar", "starch"],
                    "High in carbohydrates - may not fit ketogenic diet",
                ),
            )
            .with_rule(
                "Low Carb Diet",
                ConflictRule::new(
                    ["high_carb", "high_sugar"],
                    "High in carbohydrates - may not fit low-carb diet",
                ),
            )
            .with_rule(
                "Low Sodium Diet",
                ConflictRule::new(
                    ["high_sodium", "salt"],
                    "High sodium content - may not fit low-sodium diet requirements",
                ),
            )
    }
}
