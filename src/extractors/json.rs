//! JSON body extractor whose rejection is a 422 validation envelope.

use crate::error::AppError;
use crate::service::ValidationError;
use async_trait::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

/// Parsed request body. Shape checks are left to the schema that consumes it.
#[derive(Clone, Debug)]
pub struct ApiJson(pub Value);

#[async_trait]
impl<S> FromRequest<S> for ApiJson
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(JsonRejection::BytesRejection(rejection))
                if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE =>
            {
                Err(AppError::PayloadTooLarge)
            }
            Err(rejection) => {
                tracing::debug!(%rejection, "rejected request body");
                Err(AppError::Validation(ValidationError::single("body", "Invalid JSON body")))
            }
        }
    }
}
