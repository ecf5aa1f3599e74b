use axum::extract::State;
use labelsense_core::domain::{
    analysis::{ports::IngredientAnalysisService, value_objects::AnalyzeProductInput},
    ingredient::entities::ProductAnalysis,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    ingredient_analysis::validators::AnalyzeProductRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeProductResponse {
    pub data: ProductAnalysis,
}

#[utoipa::path(
    post,
    path = "/analyze-product",
    tag = "analysis",
    summary = "Itemized product analysis",
    description = "Analyzes a whole ingredient list in one model call, optionally informed by nutrition facts. Nothing is cached.",
    request_body = AnalyzeProductRequest,
    responses(
        (status = 200, body = AnalyzeProductResponse),
        (status = 400, description = "Invalid ingredient list"),
        (status = 503, description = "Model unavailable")
    ),
)]
pub async fn analyze_product(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<AnalyzeProductRequest>,
) -> Result<Response<AnalyzeProductResponse>, ApiError> {
    let data = state
        .service
        .analyze_product(AnalyzeProductInput {
            ingredients_list: payload.ingredients_list,
            nutrition_facts: payload.nutrition_facts,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AnalyzeProductResponse { data }))
}
