use std::future::Future;

use crate::domain::{
    analysis::value_objects::{AnalyzeIngredientsInput, AnalyzeProductInput, ExtractedIngredients},
    common::entities::app_errors::CoreError,
    ingredient::entities::{IngredientRecord, ProductAnalysis},
    personalization::entities::HealthProfile,
    report::entities::Report,
};

/// LLM Client trait for calling AI models
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    fn generate_with_image(
        &self,
        prompt: String,
        image_data: Vec<u8>,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;

    fn generate_with_text(
        &self,
        prompt: String,
        response_schema: serde_json::Value,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for ingredient analysis and personalized reports
pub trait IngredientAnalysisService: Send + Sync {
    /// Resolve the ingredients and personalize them against `profile`
    fn build_report(
        &self,
        ingredient_names: Vec<String>,
        profile: HealthProfile,
        product_name: Option<String>,
    ) -> impl Future<Output = Result<Report, CoreError>> + Send;

    /// Same as `build_report`, loading the profile of `input.user_id`
    fn analyze_ingredients(
        &self,
        input: AnalyzeIngredientsInput,
    ) -> impl Future<Output = Result<Report, CoreError>> + Send;

    fn get_cached_ingredient(
        &self,
        name: String,
    ) -> impl Future<Output = Result<Option<IngredientRecord>, CoreError>> + Send;

    fn refresh_ingredient(
        &self,
        name: String,
    ) -> impl Future<Output = Result<IngredientRecord, CoreError>> + Send;

    fn analyze_product(
        &self,
        input: AnalyzeProductInput,
    ) -> impl Future<Output = Result<ProductAnalysis, CoreError>> + Send;

    fn extract_ingredients(
        &self,
        image_data: Vec<u8>,
    ) -> impl Future<Output = Result<ExtractedIngredients, CoreError>> + Send;
}
