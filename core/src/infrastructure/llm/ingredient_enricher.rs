use std::str::FromStr;

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::domain::{
    analysis::{
        helpers::{extract_json_object, ingredient_analysis_prompt, product_analysis_prompt},
        ports::LLMClient,
        schema::{get_ingredient_analysis_schema, get_product_analysis_schema},
    },
    ingredient::{
        entities::{
            Concern, IngredientAnalysis, ItemizedIngredient, NutritionFacts, ProductAnalysis,
            Severity,
        },
        errors::EnrichmentError,
        ports::IngredientEnricher,
    },
};

// Loose shapes of what the model sends back; tightened in `into_analysis`.

#[derive(Debug, Deserialize)]
struct RawConcern {
    condition: String,
    #[serde(default)]
    level: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    potential_concerns: Vec<RawConcern>,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    ingredient_name: String,
    #[serde(flatten)]
    analysis: RawAnalysis,
}

#[derive(Debug, Deserialize)]
struct RawProduct {
    #[serde(default)]
    items: Vec<RawItem>,
    #[serde(default)]
    summary: Option<String>,
}

impl RawAnalysis {
    fn into_analysis(self) -> Result<IngredientAnalysis, EnrichmentError> {
        let concerns = self
            .potential_concerns
            .into_iter()
            .map(|concern| -> Result<Concern, EnrichmentError> {
                let severity = match concern.level.as_deref() {
                    None => Severity::default(),
                    Some(level) => {
                        Severity::from_str(level).map_err(EnrichmentError::MalformedResponse)?
                    }
                };
                Ok(Concern::new(concern.condition, severity))
            })
            .collect::<Result<Vec<_>, EnrichmentError>>()?;

        Ok(IngredientAnalysis::new(self.kind, self.tags, concerns))
    }
}

fn parse_json<T: for<'de> Deserialize<'de>>(raw: &str) -> Result<T, EnrichmentError> {
    let json = extract_json_object(raw)
        .ok_or_else(|| EnrichmentError::MalformedResponse("no JSON object in response".to_string()))?;

    serde_json::from_str(json).map_err(|e| EnrichmentError::MalformedResponse(e.to_string()))
}

/// Enrichment backed by a generative model.
#[derive(Debug, Clone)]
pub struct LlmIngredientEnricher<LLM> {
    llm_client: LLM,
}

impl<LLM> LlmIngredientEnricher<LLM>
where
    LLM: LLMClient,
{
    pub fn new(llm_client: LLM) -> Self {
        Self { llm_client }
    }
}

impl<LLM> IngredientEnricher for LlmIngredientEnricher<LLM>
where
    LLM: LLMClient,
{
    #[instrument(skip(self))]
    async fn analyze(&self, name: &str) -> Result<IngredientAnalysis, EnrichmentError> {
        let raw_response = self
            .llm_client
            .generate_with_text(
                ingredient_analysis_prompt(name),
                get_ingredient_analysis_schema(),
            )
            .await
            .map_err(|e| EnrichmentError::Request(e.to_string()))?;

        debug!(bytes = raw_response.len(), "received ingredient analysis");
        parse_json::<RawAnalysis>(&raw_response)?.into_analysis()
    }

    #[instrument(skip_all, fields(count = names.len()))]
    async fn analyze_batch(
        &self,
        names: Vec<String>,
        nutrition_facts: Option<NutritionFacts>,
    ) -> Result<ProductAnalysis, EnrichmentError> {
        let raw_response = self
            .llm_client
            .generate_with_text(
                product_analysis_prompt(&names, nutrition_facts.as_ref()),
                get_product_analysis_schema(),
            )
            .await
            .map_err(|e| EnrichmentError::Request(e.to_string()))?;

        let product: RawProduct = parse_json(&raw_response)?;
        // A bad item only costs that item; callers see it as omitted.
        let items = product
            .items
            .into_iter()
            .filter_map(|item| match item.analysis.into_analysis() {
                Ok(analysis) => Some(ItemizedIngredient {
                    ingredient_name: item.ingredient_name,
                    analysis,
                }),
                Err(e) => {
                    warn!(ingredient = %item.ingredient_name, error = %e, "skipping unparseable batch item");
                    None
                }
            })
            .collect();

        Ok(ProductAnalysis {
            items,
            summary: product.summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{analysis::ports::MockLLMClient, common::entities::app_errors::CoreError};

    fn enricher_replying(reply: &'static str) -> LlmIngredientEnricher<MockLLMClient> {
        let mut llm_client = MockLLMClient::new();
        llm_client
            .expect_generate_with_text()
            .returning(move |_, _| Box::pin(async move { Ok(reply.to_string()) }));
        LlmIngredientEnricher::new(llm_client)
    }

    #[tokio::test]
    async fn test_analyze_parses_fenced_reply() {
        let enricher = enricher_replying(
            "```json\n{\"type\": \"sweetener\", \"tags\": [\"high_sugar\"], \"potential_concerns\": [{\"condition\": \"Diabetes\", \"level\": \"high\"}]}\n```",
        );

        let analysis = enricher.analyze("sugar").await.unwrap();

        assert_eq!(analysis.kind, "sweetener");
        assert!(analysis.tags.contains("high_sugar"));
        assert_eq!(analysis.concerns[0].severity, Severity::High);
    }

    #[tokio::test]
    async fn test_missing_level_defaults_to_medium() {
        let enricher = enricher_replying(
            r#"{"type": "additive", "tags": [], "potential_concerns": [{"condition": "Hypertension"}]}"#,
        );

        let analysis = enricher.analyze("msg").await.unwrap();

        assert_eq!(analysis.concerns[0].severity, Severity::Medium);
    }

    #[tokio::test]
    async fn test_unknown_level_is_malformed() {
        let enricher = enricher_replying(
            r#"{"type": "additive", "tags": [], "potential_concerns": [{"condition": "Hypertension", "level": "SEVERE"}]}"#,
        );

        let result = enricher.analyze("msg").await;

        assert!(matches!(result, Err(EnrichmentError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_non_json_reply_is_malformed() {
        let enricher = enricher_replying("I cannot help with that.");

        let result = enricher.analyze("sugar").await;

        assert!(matches!(result, Err(EnrichmentError::MalformedResponse(_))));
    }

    #[tokio::test]
    async fn test_transport_failure_is_request_error() {
        let mut llm_client = MockLLMClient::new();
        llm_client.expect_generate_with_text().returning(|_, _| {
            Box::pin(async { Err(CoreError::ExternalServiceError("503".to_string())) })
        });
        let enricher = LlmIngredientEnricher::new(llm_client);

        let result = enricher.analyze("sugar").await;

        assert!(matches!(result, Err(EnrichmentError::Request(_))));
    }

    #[tokio::test]
    async fn test_analyze_batch_itemizes() {
        let enricher = enricher_replying(
            r#"{"items": [{"ingredient_name": "Salt", "type": "mineral", "tags": ["high_sodium"], "potential_concerns": []}], "summary": "Salty snack"}"#,
        );

        let product = enricher
            .analyze_batch(vec!["Salt".to_string()], None)
            .await
            .unwrap();

        assert_eq!(product.items[0].ingredient_name, "Salt");
        assert_eq!(product.items[0].analysis.kind, "mineral");
        assert_eq!(product.summary.as_deref(), Some("Salty snack"));
    }

    #[tokio::test]
    async fn test_analyze_batch_skips_unparseable_item() {
        let enricher = enricher_replying(
            r#"{"items": [
                {"ingredient_name": "Salt", "type": "mineral", "tags": ["high_sodium"], "potential_concerns": []},
                {"ingredient_name": "Sugar", "type": "sweetener", "tags": [], "potential_concerns": [{"condition": "Diabetes", "level": "Moderate"}]}
            ]}"#,
        );

        let product = enricher
            .analyze_batch(vec!["Salt".to_string(), "Sugar".to_string()], None)
            .await
            .unwrap();

        assert_eq!(product.items.len(), 1);
        assert_eq!(product.items[0].ingredient_name, "Salt");
        assert_eq!(product.items[0].analysis.kind, "mineral");
    }
}
