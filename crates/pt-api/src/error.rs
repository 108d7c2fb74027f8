//! API error handling
//!
//! Renders failures as JSON error bodies.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pt_core::error::{PtError, ValidationErrors};
use serde::Serialize;
use tracing::error;

/// API error types
#[derive(Debug)]
pub enum ApiError {
    NotFound {
        resource: &'static str,
        field: &'static str,
        value: String,
    },
    Validation(ValidationErrors),
    Unauthorized(String),
    Forbidden(String),
    BadRequest(String),
    Conflict(String),
    BadGateway(String),
    Internal(String),
}

impl ApiError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        ApiError::Unauthorized(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PtError> for ApiError {
    fn from(err: PtError) -> Self {
        match err {
            PtError::NotFound {
                entity,
                field,
                value,
            } => ApiError::NotFound {
                resource: entity,
                field,
                value,
            },
            PtError::Validation(errors) => ApiError::Validation(errors),
            PtError::Unauthorized { message } => ApiError::Unauthorized(message),
            PtError::Forbidden { message } => ApiError::Forbidden(message),
            PtError::Conflict { message } => ApiError::Conflict(message),
            PtError::Remote(message) => ApiError::BadGateway(message),
            other => {
                error!(code = other.error_code(), error = %other, "Request failed");
                ApiError::Internal(other.to_string())
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    #[serde(rename = "_type")]
    type_name: &'static str,
    #[serde(rename = "errorIdentifier")]
    error_identifier: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (error_identifier, message) = match self {
            ApiError::NotFound {
                resource,
                field,
                value,
            } => (
                "urn:prodtrack:errors:NotFound",
                format!("{resource} with {field} {value} not found"),
            ),
            ApiError::Validation(errors) => (
                "urn:prodtrack:errors:PropertyConstraintViolation",
                errors.full_messages().join(", "),
            ),
            ApiError::Unauthorized(msg) => ("urn:prodtrack:errors:Unauthenticated", msg),
            ApiError::Forbidden(msg) => ("urn:prodtrack:errors:MissingPermission", msg),
            ApiError::BadRequest(msg) => ("urn:prodtrack:errors:InvalidRequest", msg),
            ApiError::Conflict(msg) => ("urn:prodtrack:errors:UpdateConflict", msg),
            ApiError::BadGateway(msg) => ("urn:prodtrack:errors:RemoteUnavailable", msg),
            ApiError::Internal(msg) => ("urn:prodtrack:errors:InternalError", msg),
        };

        let body = ErrorBody {
            type_name: "Error",
            error_identifier,
            message,
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_errors_keep_their_status() {
        let not_found: ApiError = PtError::not_found("ProductionEntry", "id", "42").into();
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let invalid: ApiError = PtError::invalid("Cannot delete last admin").into();
        assert_eq!(invalid.status_code(), StatusCode::UNPROCESSABLE_ENTITY);

        let storage: ApiError = PtError::Storage("disk full".into()).into();
        assert_eq!(storage.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_validation_message_in_body() {
        let response = ApiError::from(PtError::invalid("Passwords do not match")).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
