use axum::extract::{Multipart, State};
use labelsense_core::domain::analysis::{
    ports::IngredientAnalysisService, value_objects::ExtractedIngredients,
};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

#[utoipa::path(
    post,
    path = "/extract-ingredients",
    tag = "analysis",
    summary = "Extract ingredients from a label photo",
    description = "Reads the ingredients section of a food label image (multipart field `image`, at most 10MB)",
    responses(
        (status = 200, body = ExtractedIngredients),
        (status = 400, description = "Missing, oversized or unreadable image"),
        (status = 503, description = "Model unavailable")
    ),
)]
pub async fn extract_ingredients(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response<ExtractedIngredients>, ApiError> {
    let mut image_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() != Some("image") {
            continue;
        }

        if let Some(content_type) = field.content_type() {
            if !content_type.starts_with("image/") {
                return Err(ApiError::BadRequest(
                    "File must be an image".to_string(),
                ));
            }
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

        if data.len() > MAX_IMAGE_SIZE {
            return Err(ApiError::BadRequest(format!(
                "Image too large. Max size is {} bytes",
                MAX_IMAGE_SIZE
            )));
        }

        image_data = Some(data.to_vec());
    }

    let image_data =
        image_data.ok_or_else(|| ApiError::BadRequest("Missing image field".to_string()))?;

    let extracted = state
        .service
        .extract_ingredients(image_data)
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(extracted))
}
