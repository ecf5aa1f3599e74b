use crate::domain::{
    analysis::ports::LLMClient,
    common::{entities::app_errors::CoreError, services::Service},
    health::{
        entities::DatabaseHealthStatus,
        ports::{HealthCheckRepository, HealthCheckService},
    },
    health_profile::ports::HealthProfileRepository,
    ingredient::ports::{IngredientEnricher, IngredientRepository},
};

impl<IR, HP, EN, LLM, HC> HealthCheckService for Service<IR, HP, EN, LLM, HC>
where
    IR: IngredientRepository,
    HP: HealthProfileRepository,
    EN: IngredientEnricher,
    LLM: LLMClient,
    HC: HealthCheckRepository,
{
    async fn readness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        self.health_check_repository.readness().await
    }

    async fn health(&self) -> Result<u64, CoreError> {
        self.health_check_repository.health().await
    }
}
