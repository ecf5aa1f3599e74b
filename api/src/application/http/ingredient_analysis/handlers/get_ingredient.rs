use axum::extract::{Path, State};
use labelsense_core::domain::{
    analysis::ports::IngredientAnalysisService, ingredient::entities::IngredientRecord,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IngredientResponse {
    pub data: IngredientRecord,
}

#[utoipa::path(
    get,
    path = "/ingredient/{name}",
    tag = "analysis",
    summary = "Cached ingredient analysis",
    params(
        ("name" = String, Path, description = "Ingredient name, matched case-insensitively"),
    ),
    responses(
        (status = 200, body = IngredientResponse),
        (status = 404, description = "Ingredient has not been analyzed yet")
    ),
)]
pub async fn get_ingredient(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Response<IngredientResponse>, ApiError> {
    let record = state
        .service
        .get_cached_ingredient(name.clone())
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::NotFound(format!("Ingredient '{}' not found", name)))?;

    Ok(Response::OK(IngredientResponse { data: record }))
}
