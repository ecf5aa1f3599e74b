use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::domain::{
    analysis::{
        helpers::{INGREDIENT_EXTRACTION_PROMPT, extract_json_object, parse_ingredients_list},
        ports::{IngredientAnalysisService, LLMClient},
        schema::get_ingredient_extraction_schema,
        value_objects::{AnalyzeIngredientsInput, AnalyzeProductInput, ExtractedIngredients},
    },
    common::{entities::app_errors::CoreError, services::Service},
    health::ports::HealthCheckRepository,
    health_profile::ports::HealthProfileRepository,
    ingredient::{
        entities::{IngredientAnalysis, IngredientRecord, ItemizedIngredient, ProductAnalysis},
        ports::{IngredientEnricher, IngredientRepository},
        value_objects::normalize_ingredient_name,
    },
    personalization::entities::HealthProfile,
    report::{entities::Report, services::assemble_report},
};

#[derive(Debug, Deserialize)]
struct ExtractionReply {
    ingredients_text: String,
}

fn non_blank(names: Vec<String>) -> Result<Vec<String>, CoreError> {
    let names: Vec<String> = names
        .into_iter()
        .filter(|name| !name.trim().is_empty())
        .collect();

    if names.is_empty() {
        return Err(CoreError::Invalid);
    }

    Ok(names)
}

impl<IR, HP, EN, LLM, HC> IngredientAnalysisService for Service<IR, HP, EN, LLM, HC>
where
    IR: IngredientRepository,
    HP: HealthProfileRepository,
    EN: IngredientEnricher,
    LLM: LLMClient,
    HC: HealthCheckRepository,
{
    #[instrument(skip_all, fields(ingredients = ingredient_names.len()))]
    async fn build_report(
        &self,
        ingredient_names: Vec<String>,
        profile: HealthProfile,
        product_name: Option<String>,
    ) -> Result<Report, CoreError> {
        let resolved = self.resolver().resolve(&ingredient_names).await?;
        let warnings = self.engine.analyze_conflicts(&profile, &resolved);
        let report = assemble_report(product_name, &resolved, &profile, warnings);

        info!(
            status = ?report.overall_summary.status,
            warnings = report.warnings.len(),
            "ingredient report built"
        );

        Ok(report)
    }

    #[instrument(skip_all, fields(user_id = %input.user_id))]
    async fn analyze_ingredients(&self, input: AnalyzeIngredientsInput) -> Result<Report, CoreError> {
        let ingredient_names = non_blank(input.ingredients_list)?;

        let profile = self
            .health_profile_repository
            .get_by_user_id(input.user_id)
            .await?
            .ok_or(CoreError::HealthProfileNotFound)?;

        self.build_report(ingredient_names, profile, input.product_name)
            .await
    }

    async fn get_cached_ingredient(
        &self,
        name: String,
    ) -> Result<Option<IngredientRecord>, CoreError> {
        self.ingredient_repository
            .get(&normalize_ingredient_name(&name))
            .await
    }

    async fn refresh_ingredient(&self, name: String) -> Result<IngredientRecord, CoreError> {
        if name.trim().is_empty() {
            return Err(CoreError::Invalid);
        }

        self.resolver().refresh(&name).await
    }

    #[instrument(skip_all, fields(ingredients = input.ingredients_list.len()))]
    async fn analyze_product(&self, input: AnalyzeProductInput) -> Result<ProductAnalysis, CoreError> {
        let ingredient_names = non_blank(input.ingredients_list)?;

        let product = self
            .enricher
            .analyze_batch(ingredient_names, input.nutrition_facts)
            .await
            .map_err(|e| {
                tracing::error!("Product analysis failed: {}", e);
                CoreError::ExternalServiceError(e.to_string())
            })?;

        let items = product
            .items
            .into_iter()
            .filter_map(|item| match IngredientAnalysis::validated(item.analysis) {
                Ok(analysis) => Some(ItemizedIngredient {
                    ingredient_name: item.ingredient_name,
                    analysis,
                }),
                Err(e) => {
                    warn!(ingredient = %item.ingredient_name, error = %e, "dropping invalid product item");
                    None
                }
            })
            .collect();

        Ok(ProductAnalysis {
            items,
            summary: product.summary,
        })
    }

    #[instrument(skip_all, fields(image_bytes = image_data.len()))]
    async fn extract_ingredients(&self, image_data: Vec<u8>) -> Result<ExtractedIngredients, CoreError> {
        if image_data.is_empty() {
            return Err(CoreError::Invalid);
        }

        let raw_response = self
            .llm_client
            .generate_with_image(
                INGREDIENT_EXTRACTION_PROMPT.to_string(),
                image_data,
                get_ingredient_extraction_schema(),
            )
            .await?;

        let text = extract_json_object(&raw_response)
            .and_then(|json| serde_json::from_str::<ExtractionReply>(json).ok())
            .map(|reply| reply.ingredients_text)
            .unwrap_or(raw_response);

        parse_ingredients_list(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        analysis::ports::MockLLMClient,
        common::AnalysisConfig,
        health::ports::MockHealthCheckRepository,
        health_profile::ports::MockHealthProfileRepository,
        ingredient::entities::{Concern, Severity},
        personalization::entities::{VerdictStatus, WarningType},
    };
    use crate::infrastructure::ingredient::InMemoryIngredientRepository;
    use crate::test_support::StubEnricher;
    use uuid::Uuid;

    type TestService = Service<
        InMemoryIngredientRepository,
        MockHealthProfileRepository,
        StubEnricher,
        MockLLMClient,
        MockHealthCheckRepository,
    >;

    fn service_with(
        profiles: MockHealthProfileRepository,
        enricher: StubEnricher,
        llm_client: MockLLMClient,
    ) -> TestService {
        Service::new(
            InMemoryIngredientRepository::new(),
            profiles,
            enricher,
            llm_client,
            MockHealthCheckRepository::new(),
            AnalysisConfig::default(),
        )
    }

    fn peanut_enricher() -> StubEnricher {
        StubEnricher::new()
            .with_analysis(
                "peanut oil",
                IngredientAnalysis::new("fat", ["contains_peanuts"], vec![]),
            )
            .with_analysis(
                "salt",
                IngredientAnalysis::new(
                    "mineral",
                    ["high_sodium"],
                    vec![Concern::new("Hypertension", Severity::High)],
                ),
            )
    }

    #[tokio::test]
    async fn test_analyze_ingredients_builds_personalized_report() {
        let mut profiles = MockHealthProfileRepository::new();
        profiles.expect_get_by_user_id().returning(|_| {
            Box::pin(async {
                Ok(Some(HealthProfile {
                    allergies: vec!["Peanuts".to_string()],
                    ..Default::default()
                }))
            })
        });
        let service = service_with(profiles, peanut_enricher(), MockLLMClient::new());

        let report = service
            .analyze_ingredients(AnalyzeIngredientsInput {
                user_id: Uuid::new_v4(),
                ingredients_list: vec!["Peanut Oil".to_string(), "  ".to_string(), "Xylitol".to_string()],
                product_name: Some("Trail Mix".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(report.product_name, "Trail Mix");
        assert_eq!(report.total_ingredients, 2);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].ingredient, "Peanut Oil");
        assert_eq!(report.warnings[0].severity, Severity::High);
        assert_eq!(report.warnings[0].warning_type, WarningType::Allergy);
        assert_eq!(report.overall_summary.status, VerdictStatus::NotRecommended);
        assert_eq!(report.ingredients_analyzed[1].kind, "unknown");
    }

    #[tokio::test]
    async fn test_analyze_ingredients_requires_profile() {
        let mut profiles = MockHealthProfileRepository::new();
        profiles
            .expect_get_by_user_id()
            .returning(|_| Box::pin(async { Ok(None) }));
        let service = service_with(profiles, peanut_enricher(), MockLLMClient::new());

        let result = service
            .analyze_ingredients(AnalyzeIngredientsInput {
                user_id: Uuid::new_v4(),
                ingredients_list: vec!["salt".to_string()],
                product_name: None,
            })
            .await;

        assert_eq!(result, Err(CoreError::HealthProfileNotFound));
    }

    #[tokio::test]
    async fn test_analyze_ingredients_rejects_empty_list() {
        let service = service_with(
            MockHealthProfileRepository::new(),
            peanut_enricher(),
            MockLLMClient::new(),
        );

        let result = service
            .analyze_ingredients(AnalyzeIngredientsInput {
                user_id: Uuid::new_v4(),
                ingredients_list: vec![" ".to_string()],
                product_name: None,
            })
            .await;

        assert_eq!(result, Err(CoreError::Invalid));
    }

    #[tokio::test]
    async fn test_cached_ingredient_lookup_normalizes() {
        let service = service_with(
            MockHealthProfileRepository::new(),
            peanut_enricher(),
            MockLLMClient::new(),
        );

        assert_eq!(service.get_cached_ingredient("Salt".to_string()).await, Ok(None));

        service
            .build_report(vec!["salt".to_string()], HealthProfile::default(), None)
            .await
            .unwrap();

        let cached = service
            .get_cached_ingredient("  SALT ".to_string())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cached.name, "salt");
        assert_eq!(cached.kind, "mineral");
    }

    #[tokio::test]
    async fn test_extract_ingredients_from_structured_reply() {
        let mut llm_client = MockLLMClient::new();
        llm_client.expect_generate_with_image().returning(|_, _, _| {
            Box::pin(async {
                Ok(r#"{"ingredients_text": "Sugar, Cocoa Butter, Milk Powder"}"#.to_string())
            })
        });
        let service = service_with(
            MockHealthProfileRepository::new(),
            StubEnricher::new(),
            llm_client,
        );

        let extracted = service.extract_ingredients(vec![0xFF, 0xD8]).await.unwrap();

        assert_eq!(
            extracted.ingredients_list,
            vec!["Sugar", "Cocoa Butter", "Milk Powder"]
        );
    }

    #[tokio::test]
    async fn test_extract_ingredients_without_list() {
        let mut llm_client = MockLLMClient::new();
        llm_client.expect_generate_with_image().returning(|_, _, _| {
            Box::pin(async { Ok("NO_INGREDIENTS_FOUND".to_string()) })
        });
        let service = service_with(
            MockHealthProfileRepository::new(),
            StubEnricher::new(),
            llm_client,
        );

        let result = service.extract_ingredients(vec![0xFF, 0xD8]).await;

        assert_eq!(result, Err(CoreError::NoIngredientsFound));
    }

    #[tokio::test]
    async fn test_analyze_product_surfaces_failures() {
        let enricher = StubEnricher::new()
            .with_batch_error(crate::domain::ingredient::errors::EnrichmentError::Timeout(
                std::time::Duration::from_secs(30),
            ));
        let service = service_with(
            MockHealthProfileRepository::new(),
            enricher,
            MockLLMClient::new(),
        );

        let result = service
            .analyze_product(AnalyzeProductInput {
                ingredients_list: vec!["salt".to_string()],
                nutrition_facts: None,
            })
            .await;

        assert!(matches!(result, Err(CoreError::ExternalServiceError(_))));
    }

    #[tokio::test]
    async fn test_analyze_product_returns_itemized_analysis() {
        let service = service_with(
            MockHealthProfileRepository::new(),
            peanut_enricher(),
            MockLLMClient::new(),
        );

        let product = service
            .analyze_product(AnalyzeProductInput {
                ingredients_list: vec!["salt".to_string(), "peanut oil".to_string()],
                nutrition_facts: None,
            })
            .await
            .unwrap();

        assert_eq!(product.items.len(), 2);
        assert_eq!(product.items[0].ingredient_name, "salt");
    }
}
