use crate::application::http::{
    health::router::HealthApiDoc, ingredient_analysis::router::IngredientAnalysisApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Labelsense API",
        description = "Personalized ingredient analysis for packaged food labels"
    ),
    nest(
        (path = "/analysis", api = IngredientAnalysisApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
