//! Uniform response envelope: `{success, message, data?, error?, details?}`.

use crate::service::{FieldError, ValidationError};
use axum::{http::StatusCode, Json};
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct Envelope {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

pub type ApiResponse = (StatusCode, Json<Envelope>);

pub fn success_response(data: Value, message: impl Into<String>, status: StatusCode) -> ApiResponse {
    (
        status,
        Json(Envelope {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
            details: None,
        }),
    )
}

pub fn ok(data: Value, message: impl Into<String>) -> ApiResponse {
    success_response(data, message, StatusCode::OK)
}

pub fn created(data: Value, message: impl Into<String>) -> ApiResponse {
    success_response(data, message, StatusCode::CREATED)
}

pub fn error_response(error: impl Into<String>, status: StatusCode, message: impl Into<String>) -> ApiResponse {
    (
        status,
        Json(Envelope {
            success: false,
            message: message.into(),
            data: None,
            error: Some(error.into()),
            details: None,
        }),
    )
}

pub fn unauthorized(error: impl Into<String>) -> ApiResponse {
    error_response(error, StatusCode::UNAUTHORIZED, "Authentication required")
}

pub fn forbidden() -> ApiResponse {
    error_response("Forbidden", StatusCode::FORBIDDEN, "Access denied")
}

pub fn not_found(error: impl Into<String>) -> ApiResponse {
    error_response(error, StatusCode::NOT_FOUND, "Resource not found")
}

pub fn validation_error(err: &ValidationError) -> ApiResponse {
    let (status, Json(mut body)) = error_response(
        err.first_message(),
        StatusCode::UNPROCESSABLE_ENTITY,
        "Validation error",
    );
    body.details = Some(err.errors.clone());
    (status, Json(body))
}

pub fn internal_error() -> ApiResponse {
    error_response(
        "Internal server error",
        StatusCode::INTERNAL_SERVER_ERROR,
        "Something went wrong",
    )
}

pub fn payload_too_large() -> ApiResponse {
    error_response(
        "Payload too large",
        StatusCode::PAYLOAD_TOO_LARGE,
        "Request body too large",
    )
}

pub fn too_many_requests() -> ApiResponse {
    error_response(
        "Too many requests",
        StatusCode::TOO_MANY_REQUESTS,
        "Too many requests, please try again later",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_carries_data_but_no_error() {
        let (status, Json(body)) = created(json!({ "id": "1" }), "Page created successfully");
        assert_eq!(status, StatusCode::CREATED);
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["success"], true);
        assert_eq!(v["data"]["id"], "1");
        assert!(v.get("error").is_none());
    }

    #[test]
    fn error_carries_error_but_no_data() {
        let (status, Json(body)) = not_found("Page not found");
        assert_eq!(status, StatusCode::NOT_FOUND);
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v, json!({ "success": false, "message": "Resource not found", "error": "Page not found" }));
    }

    #[test]
    fn named_errors_carry_their_status() {
        assert_eq!(forbidden().0, StatusCode::FORBIDDEN);
        assert_eq!(unauthorized("Invalid credentials").0, StatusCode::UNAUTHORIZED);
        assert_eq!(internal_error().0, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(too_many_requests().0, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(payload_too_large().0, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[test]
    fn validation_lists_every_field() {
        let err = ValidationError {
            errors: vec![
                FieldError { field: "email".into(), message: "Invalid email address".into() },
                FieldError { field: "name".into(), message: "Required".into() },
            ],
        };
        let (status, Json(body)) = validation_error(&err);
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body.error.as_deref(), Some("Invalid email address"));
        assert_eq!(body.details.map(|d| d.len()), Some(2));
    }
}
