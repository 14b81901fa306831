// Route exports
pub mod neighborhoods;
pub mod users;

use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse, ResponseError};
use crate::config::MatchingSettings;
use crate::core::Matcher;
use crate::models::ErrorResponse;
use crate::services::{Catalog, StoreError, UserStore};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub store: Arc<UserStore>,
    pub matcher: Matcher,
    pub matching: MatchingSettings,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(neighborhoods::configure)
            .configure(users::configure),
    );
}

/// An `ErrorResponse` raised from extractor error handlers
#[derive(Debug)]
pub struct ApiError(pub ErrorResponse);

impl ApiError {
    pub fn bad_request(error: &str, message: impl Into<String>) -> Self {
        Self(ErrorResponse {
            error: error.to_string(),
            message: message.into(),
            status_code: StatusCode::BAD_REQUEST.as_u16(),
        })
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.0.error, self.0.message)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.0.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(&self.0)
    }
}

/// Handle JSON payload errors
pub fn json_error_handler(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    ApiError::bad_request("invalid_json", format!("Invalid JSON: {}", err)).into()
}

/// Handle query string errors
pub fn query_error_handler(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::bad_request("invalid_query", format!("Invalid query: {}", err)).into()
}

pub(crate) fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code: status.as_u16(),
    })
}

pub(crate) fn store_error_response(err: &StoreError) -> HttpResponse {
    match err {
        StoreError::UserNotFound(_) => error_response(StatusCode::NOT_FOUND, "user_not_found", err.to_string()),
        StoreError::EmailTaken(_) => error_response(StatusCode::CONFLICT, "email_taken", err.to_string()),
        StoreError::InvalidCredentials => {
            error_response(StatusCode::UNAUTHORIZED, "invalid_credentials", err.to_string())
        }
        StoreError::IoError(_) | StoreError::SerializationError(_) => {
            tracing::error!("User store failure: {}", err);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "store_error", err.to_string())
        }
    }
}
