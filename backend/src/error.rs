//! Error handling for the HarvestGuard backend
//!
//! Provides consistent error responses in English and Bengali

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_bn: String,
    },

    #[error("Invalid batch: {message}")]
    InvalidBatch {
        message: String,
        message_bn: String,
    },

    // External service errors
    #[error("Environment source unavailable: {0}")]
    EnvironmentUnavailable(String),

    #[error("Advisory service error: {0}")]
    AdvisoryUnavailable(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message_en: String,
    pub message_bn: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation {
                field,
                message,
                message_bn,
            } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message_en: message.clone(),
                    message_bn: message_bn.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::InvalidBatch {
                message,
                message_bn,
            } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "INVALID_BATCH".to_string(),
                    message_en: message.clone(),
                    message_bn: message_bn.clone(),
                    field: None,
                },
            ),
            AppError::EnvironmentUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "ENVIRONMENT_UNAVAILABLE".to_string(),
                    message_en: format!("Environment data is temporarily unavailable: {}", msg),
                    message_bn: "পরিবেশগত তথ্য সাময়িকভাবে পাওয়া যাচ্ছে না".to_string(),
                    field: None,
                },
            ),
            AppError::AdvisoryUnavailable(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "ADVISORY_UNAVAILABLE".to_string(),
                    message_en: format!("Advisory service error: {}", msg),
                    message_bn: "পরামর্শ পরিষেবায় ত্রুটি ঘটেছে".to_string(),
                    field: None,
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message_en: format!("Configuration error: {}", msg),
                    message_bn: "সেটিংসে ত্রুটি ঘটেছে".to_string(),
                    field: None,
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
