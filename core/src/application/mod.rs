use std::time::Duration;

use tracing::info;

use crate::{
    domain::common::{LabelsenseConfig, services::Service},
    infrastructure::{
        db::postgres::{Postgres, PostgresConfig},
        health::PostgresHealthCheckRepository,
        health_profile::PostgresHealthProfileRepository,
        ingredient::PostgresIngredientRepository,
        llm::{GeminiLLMClient, LlmIngredientEnricher},
    },
};

pub type LabelsenseService = Service<
    PostgresIngredientRepository,
    PostgresHealthProfileRepository,
    LlmIngredientEnricher<GeminiLLMClient>,
    GeminiLLMClient,
    PostgresHealthCheckRepository,
>;

pub async fn create_service(config: LabelsenseConfig) -> Result<LabelsenseService, anyhow::Error> {
    let postgres = Postgres::new(PostgresConfig {
        database_url: config.database.url(),
    })
    .await?;
    let db = postgres.get_db();

    let llm_client = GeminiLLMClient::new(
        config.llm.gemini_api_key.clone(),
        config.llm.gemini_model.clone(),
        Duration::from_secs(config.llm.request_timeout_secs),
    );

    info!(
        match_mode = %config.analysis.match_mode,
        strategy = %config.analysis.resolution_strategy,
        "analysis service ready"
    );

    Ok(Service::new(
        PostgresIngredientRepository::new(db.clone()),
        PostgresHealthProfileRepository::new(db.clone()),
        LlmIngredientEnricher::new(llm_client.clone()),
        llm_client,
        PostgresHealthCheckRepository::new(db),
        config.analysis,
    ))
}
