use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::handlers::{
    analyze_ingredients::{__path_analyze_ingredients, analyze_ingredients},
    analyze_product::{__path_analyze_product, analyze_product},
    extract_ingredients::{__path_extract_ingredients, MAX_IMAGE_SIZE, extract_ingredients},
    get_ingredient::{__path_get_ingredient, get_ingredient},
    refresh_ingredient::{__path_refresh_ingredient, refresh_ingredient},
};
use crate::application::http::server::app_state::AppState;

// Leaves room for multipart framing around the image itself.
const MULTIPART_BODY_LIMIT: usize = MAX_IMAGE_SIZE + 1024 * 1024;

#[derive(OpenApi)]
#[openapi(paths(
    analyze_ingredients,
    extract_ingredients,
    analyze_product,
    get_ingredient,
    refresh_ingredient
))]
pub struct IngredientAnalysisApiDoc;

pub fn ingredient_analysis_routes(state: AppState) -> Router<AppState> {
    let root_path = &state.args.server.root_path;

    Router::new()
        .route(
            &format!("{}/analysis/analyze-ingredients", root_path),
            post(analyze_ingredients),
        )
        .route(
            &format!("{}/analysis/extract-ingredients", root_path),
            post(extract_ingredients).layer(DefaultBodyLimit::max(MULTIPART_BODY_LIMIT)),
        )
        .route(
            &format!("{}/analysis/analyze-product", root_path),
            post(analyze_product),
        )
        .route(
            &format!("{}/analysis/ingredient/{{name}}", root_path),
            get(get_ingredient),
        )
        .route(
            &format!("{}/analysis/ingredient/{{name}}/refresh", root_path),
            post(refresh_ingredient),
        )
}
