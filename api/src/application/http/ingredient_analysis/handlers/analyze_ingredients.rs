use axum::extract::State;
use labelsense_core::domain::{
    analysis::{ports::IngredientAnalysisService, value_objects::AnalyzeIngredientsInput},
    report::entities::Report,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::{
    ingredient_analysis::validators::AnalyzeIngredientsRequest,
    server::{
        api_entities::{
            api_error::{ApiError, ValidateJson},
            response::Response,
        },
        app_state::AppState,
    },
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeIngredientsResponse {
    pub message: String,
    pub report: Report,
}

#[utoipa::path(
    post,
    path = "/analyze-ingredients",
    tag = "analysis",
    summary = "Personalized ingredient report",
    description = "Resolves each ingredient through the shared cache, enriching misses, and checks them against the user's health profile",
    request_body = AnalyzeIngredientsRequest,
    responses(
        (status = 200, body = AnalyzeIngredientsResponse),
        (status = 400, description = "Invalid ingredient list"),
        (status = 404, description = "No health profile for this user"),
        (status = 503, description = "Ingredient store unavailable")
    ),
)]
pub async fn analyze_ingredients(
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<AnalyzeIngredientsRequest>,
) -> Result<Response<AnalyzeIngredientsResponse>, ApiError> {
    let report = state
        .service
        .analyze_ingredients(AnalyzeIngredientsInput {
            user_id: payload.user_id,
            ingredients_list: payload.ingredients_list,
            product_name: payload.product_name,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AnalyzeIngredientsResponse {
        message: "Analysis completed successfully".to_string(),
        report,
    }))
}
