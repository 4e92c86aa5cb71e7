//! Translation of domain errors and extractor rejections into HTTP responses.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::ErrorResponse;
use tracing::{error, warn};

use crate::domain::DomainError;

/// Error returned by every handler; always rendered as an [`ErrorResponse`] body
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    detail: Option<String>,
}

impl ApiError {
    fn bad_request(message: &str, detail: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
            detail: Some(detail),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(rule) => Self::bad_request("Validation failed", rule.to_string()),
            DomainError::NotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: e.to_string(),
                detail: None,
            },
            DomainError::Storage(cause) => {
                error!("Storage failure: {}", cause);
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: "Internal storage error".to_string(),
                    detail: None,
                }
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());
        Self::bad_request("Invalid request body", rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        warn!("Rejected query string: {}", rejection.body_text());
        Self::bad_request("Invalid query parameters", rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            message: self.message,
            detail: self.detail,
        };
        (self.status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// JSON body extractor whose rejections use the API error format
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor whose rejections use the API error format
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);
