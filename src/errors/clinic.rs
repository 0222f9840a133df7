use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

/// Standardized error response for clinic CRUD endpoints
#[derive(Object, Debug)]
pub struct ClinicErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Error types for clinic entity endpoints
#[derive(ApiResponse, Debug)]
pub enum ClinicError {
    /// Requested or referenced entity does not exist
    #[oai(status = 404)]
    NotFound(Json<ClinicErrorResponse>),

    /// Field validation failed
    #[oai(status = 400)]
    ValidationFailed(Json<ClinicErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<ClinicErrorResponse>),
}

impl ClinicError {
    /// Create a NotFound error for the named entity
    pub fn not_found(entity: &str) -> Self {
        ClinicError::NotFound(Json(ClinicErrorResponse {
            error: "not_found".to_string(),
            message: format!("{} not found", entity),
            status_code: 404,
        }))
    }

    /// Create a ValidationFailed error
    pub fn validation_failed(message: String) -> Self {
        ClinicError::ValidationFailed(Json(ClinicErrorResponse {
            error: "validation_failed".to_string(),
            message,
            status_code: 400,
        }))
    }

    /// Create an InternalError
    pub fn internal_error(message: String) -> Self {
        ClinicError::InternalError(Json(ClinicErrorResponse {
            error: "internal_error".to_string(),
            message,
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            ClinicError::NotFound(json) => json.0.message.clone(),
            ClinicError::ValidationFailed(json) => json.0.message.clone(),
            ClinicError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for ClinicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
