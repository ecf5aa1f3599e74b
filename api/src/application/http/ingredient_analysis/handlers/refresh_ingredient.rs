use axum::extract::{Path, State};
use labelsense_core::domain::analysis::ports::IngredientAnalysisService;

use crate::application::http::{
    ingredient_analysis::handlers::get_ingredient::IngredientResponse,
    server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/ingredient/{name}/refresh",
    tag = "analysis",
    summary = "Re-analyze an ingredient",
    description = "Enriches the ingredient again and overwrites the cached record",
    params(
        ("name" = String, Path, description = "Ingredient name"),
    ),
    responses(
        (status = 200, body = IngredientResponse),
        (status = 503, description = "Enrichment or store unavailable")
    ),
)]
pub async fn refresh_ingredient(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Response<IngredientResponse>, ApiError> {
    let record = state
        .service
        .refresh_ingredient(name)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(IngredientResponse { data: record }))
}
