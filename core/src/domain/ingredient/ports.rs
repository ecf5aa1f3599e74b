use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    ingredient::{
        entities::{IngredientAnalysis, IngredientRecord, NutritionFacts, ProductAnalysis},
        errors::EnrichmentError,
    },
};

/// Permanent, shared cache of ingredient analyses.
///
/// Keys are normalized names; implementations never normalize on their own.
#[cfg_attr(test, mockall::automock)]
pub trait IngredientRepository: Send + Sync {
    fn get(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<IngredientRecord>, CoreError>> + Send;

    /// Insert or overwrite the record stored under `record.name`
    fn put(
        &self,
        record: IngredientRecord,
    ) -> impl Future<Output = Result<IngredientRecord, CoreError>> + Send;
}

/// External source of ingredient health metadata
#[cfg_attr(test, mockall::automock)]
pub trait IngredientEnricher: Send + Sync {
    fn analyze(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<IngredientAnalysis, EnrichmentError>> + Send;

    fn analyze_batch(
        &self,
        names: Vec<String>,
        nutrition_facts: Option<NutritionFacts>,
    ) -> impl Future<Output = Result<ProductAnalysis, EnrichmentError>> + Send;
}
