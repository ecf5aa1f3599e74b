use std::time::Duration;

use crate::domain::{
    analysis::ports::LLMClient,
    common::AnalysisConfig,
    health::ports::HealthCheckRepository,
    health_profile::ports::HealthProfileRepository,
    ingredient::{
        ports::{IngredientEnricher, IngredientRepository},
        services::IngredientResolver,
    },
    personalization::services::PersonalizationEngine,
};

/// Application service wiring every port the engine depends on.
#[derive(Clone)]
pub struct Service<IR, HP, EN, LLM, HC>
where
    IR: IngredientRepository,
    HP: HealthProfileRepository,
    EN: IngredientEnricher,
    LLM: LLMClient,
    HC: HealthCheckRepository,
{
    pub(crate) ingredient_repository: IR,
    pub(crate) health_profile_repository: HP,
    pub(crate) enricher: EN,
    pub(crate) llm_client: LLM,
    pub(crate) health_check_repository: HC,
    pub(crate) engine: PersonalizationEngine,
    pub(crate) analysis: AnalysisConfig,
}

impl<IR, HP, EN, LLM, HC> Service<IR, HP, EN, LLM, HC>
where
    IR: IngredientRepository,
    HP: HealthProfileRepository,
    EN: IngredientEnricher,
    LLM: LLMClient,
    HC: HealthCheckRepository,
{
    pub fn new(
        ingredient_repository: IR,
        health_profile_repository: HP,
        enricher: EN,
        llm_client: LLM,
        health_check_repository: HC,
        analysis: AnalysisConfig,
    ) -> Self {
        Self {
            ingredient_repository,
            health_profile_repository,
            enricher,
            llm_client,
            health_check_repository,
            engine: PersonalizationEngine::with_match_mode(analysis.match_mode),
            analysis,
        }
    }

    pub(crate) fn resolver(&self) -> IngredientResolver<'_, IR, EN> {
        IngredientResolver::new(&self.ingredient_repository, &self.enricher)
            .with_strategy(self.analysis.resolution_strategy)
            .with_concurrency(self.analysis.resolve_concurrency)
            .with_enrichment_timeout(Duration::from_secs(self.analysis.enrichment_timeout_secs))
    }
}
