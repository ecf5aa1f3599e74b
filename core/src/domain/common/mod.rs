use crate::domain::{ingredient::value_objects::ResolutionStrategy, personalization::MatchMode};

pub mod entities;
pub mod services;

#[derive(Clone, Debug)]
pub struct LabelsenseConfig {
    pub database: DatabaseConfig,
    pub llm: LLMConfig,
    pub analysis: AnalysisConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.name
        )
    }
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub request_timeout_secs: u64,
}

/// Tuning for ingredient resolution and conflict matching
#[derive(Clone, Debug)]
pub struct AnalysisConfig {
    pub match_mode: MatchMode,
    pub resolution_strategy: ResolutionStrategy,
    pub resolve_concurrency: usize,
    pub enrichment_timeout_secs: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::Substring,
            resolution_strategy: ResolutionStrategy::PerIngredient,
            resolve_concurrency: 8,
            enrichment_timeout_secs: 30,
        }
    }
}
