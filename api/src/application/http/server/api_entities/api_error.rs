use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use labelsense_core::domain::common::entities::app_errors::CoreError;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    ServiceUnavailable(String),

    #[error("{0}")]
    InternalServerError(String),
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    pub code: String,
    pub status: u16,
    pub message: String,
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "E_BAD_REQUEST"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "E_NOT_FOUND"),
            ApiError::ServiceUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "E_SERVICE_UNAVAILABLE")
            }
            ApiError::InternalServerError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "E_INTERNAL_SERVER_ERROR")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.parts();
        let body = ApiErrorResponse {
            code: code.to_string(),
            status: status.as_u16(),
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::NotFound => ApiError::NotFound(error.to_string()),
            CoreError::HealthProfileNotFound => ApiError::NotFound(error.to_string()),
            CoreError::Invalid | CoreError::NoIngredientsFound => {
                ApiError::BadRequest(error.to_string())
            }
            CoreError::StoreUnavailable(_) | CoreError::ExternalServiceError(_) => {
                tracing::error!("{}", error);
                ApiError::ServiceUnavailable(error.to_string())
            }
            CoreError::InternalServerError => ApiError::InternalServerError(error.to_string()),
        }
    }
}

/// JSON body extractor that also runs `validator` rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidateJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| ApiError::BadRequest(errors.to_string().replace('\n', ", ")))?;

        Ok(ValidateJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, routing::post};
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct Payload {
        #[validate(length(min = 1, message = "items must not be empty"))]
        items: Vec<String>,
    }

    async fn echo(ValidateJson(payload): ValidateJson<Payload>) -> String {
        payload.items.join(",")
    }

    async fn send(body: &'static str) -> (StatusCode, serde_json::Value) {
        let response = Router::new()
            .route("/", post(echo))
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_validation_failure_is_bad_request() {
        let (status, body) = send(r#"{"items": []}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "E_BAD_REQUEST");
        assert_eq!(body["status"], 400);
        assert!(body["message"].as_str().unwrap().contains("items must not be empty"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (status, body) = send(r#"{"items": "#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "E_BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_valid_body_reaches_handler() {
        let (status, _) = send(r#"{"items": ["salt"]}"#).await;

        assert_eq!(status, StatusCode::OK);
    }

    #[test]
    fn test_core_errors_map_to_statuses() {
        assert!(matches!(
            ApiError::from(CoreError::HealthProfileNotFound),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(CoreError::NoIngredientsFound),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(CoreError::StoreUnavailable("down".to_string())),
            ApiError::ServiceUnavailable(_)
        ));
        assert_eq!(
            ApiError::from(CoreError::InternalServerError).parts().0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
