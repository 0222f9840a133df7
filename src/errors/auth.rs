use poem_openapi::{payload::Json, ApiResponse, Object};
use std::fmt;

/// Standardized error response for authentication endpoints
#[derive(Object, Debug)]
pub struct AuthErrorResponse {
    /// Error code identifier
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// HTTP status code
    pub status_code: u16,
}

/// Authentication error types
#[derive(ApiResponse, Debug)]
pub enum AuthError {
    /// Account temporarily locked after repeated failures
    #[oai(status = 423)]
    AccountLocked(Json<AuthErrorResponse>),

    /// Invalid email or password (uniform, regardless of which failed)
    #[oai(status = 401)]
    InvalidCredentials(Json<AuthErrorResponse>),

    /// Password accepted but a TOTP code must be submitted
    #[oai(status = 400)]
    TotpCodeRequired(Json<AuthErrorResponse>),

    /// Submitted TOTP code did not verify
    #[oai(status = 400)]
    InvalidTotpCode(Json<AuthErrorResponse>),

    /// TOTP has not been provisioned for this account
    #[oai(status = 400)]
    TotpNotConfigured(Json<AuthErrorResponse>),

    /// No account with the given email
    #[oai(status = 404)]
    AccountNotFound(Json<AuthErrorResponse>),

    /// Email already registered under one of the account kinds
    #[oai(status = 400)]
    DuplicateEmail(Json<AuthErrorResponse>),

    /// Request carried a role the endpoint does not accept
    #[oai(status = 400)]
    RoleMismatch(Json<AuthErrorResponse>),

    /// Field validation failed
    #[oai(status = 400)]
    ValidationFailed(Json<AuthErrorResponse>),

    /// Invalid or malformed JWT
    #[oai(status = 401)]
    InvalidToken(Json<AuthErrorResponse>),

    /// JWT has expired
    #[oai(status = 401)]
    ExpiredToken(Json<AuthErrorResponse>),

    /// Internal server error
    #[oai(status = 500)]
    InternalError(Json<AuthErrorResponse>),
}

impl AuthError {
    /// Create an AccountLocked error with the remaining lockout duration
    pub fn account_locked(remaining_minutes: i64) -> Self {
        AuthError::AccountLocked(Json(AuthErrorResponse {
            error: "account_locked".to_string(),
            message: format!(
                "Account locked - try again in {} min",
                remaining_minutes
            ),
            status_code: 423,
        }))
    }

    /// Create an InvalidCredentials error
    pub fn invalid_credentials() -> Self {
        AuthError::InvalidCredentials(Json(AuthErrorResponse {
            error: "invalid_credentials".to_string(),
            message: "Invalid email or password".to_string(),
            status_code: 401,
        }))
    }

    /// Create a TotpCodeRequired error
    pub fn totp_code_required() -> Self {
        AuthError::TotpCodeRequired(Json(AuthErrorResponse {
            error: "totp_code_required".to_string(),
            message: "TOTP code required".to_string(),
            status_code: 400,
        }))
    }

    /// Create an InvalidTotpCode error
    pub fn invalid_totp_code() -> Self {
        AuthError::InvalidTotpCode(Json(AuthErrorResponse {
            error: "invalid_totp_code".to_string(),
            message: "Invalid TOTP code".to_string(),
            status_code: 400,
        }))
    }

    /// Create a TotpNotConfigured error
    pub fn totp_not_configured() -> Self {
        AuthError::TotpNotConfigured(Json(AuthErrorResponse {
            error: "totp_not_configured".to_string(),
            message: "TOTP is not configured for this account".to_string(),
            status_code: 400,
        }))
    }

    /// Create an AccountNotFound error
    pub fn account_not_found() -> Self {
        AuthError::AccountNotFound(Json(AuthErrorResponse {
            error: "account_not_found".to_string(),
            message: "Account not found".to_string(),
            status_code: 404,
        }))
    }

    /// Create a DuplicateEmail error
    pub fn duplicate_email() -> Self {
        AuthError::DuplicateEmail(Json(AuthErrorResponse {
            error: "duplicate_email".to_string(),
            message: "An account with this email already exists".to_string(),
            status_code: 400,
        }))
    }

    /// Create a RoleMismatch error
    pub fn role_mismatch(message: String) -> Self {
        AuthError::RoleMismatch(Json(AuthErrorResponse {
            error: "role_mismatch".to_string(),
            message,
            status_code: 400,
        }))
    }

    /// Create a ValidationFailed error
    pub fn validation_failed(message: String) -> Self {
        AuthError::ValidationFailed(Json(AuthErrorResponse {
            error: "validation_failed".to_string(),
            message,
            status_code: 400,
        }))
    }

    /// Create an InvalidToken error
    pub fn invalid_token() -> Self {
        AuthError::InvalidToken(Json(AuthErrorResponse {
            error: "invalid_token".to_string(),
            message: "Invalid or malformed JWT".to_string(),
            status_code: 401,
        }))
    }

    /// Create an ExpiredToken error
    pub fn expired_token() -> Self {
        AuthError::ExpiredToken(Json(AuthErrorResponse {
            error: "expired_token".to_string(),
            message: "JWT has expired".to_string(),
            status_code: 401,
        }))
    }

    /// Create an InternalError
    pub fn internal_error(message: String) -> Self {
        AuthError::InternalError(Json(AuthErrorResponse {
            error: "internal_error".to_string(),
            message,
            status_code: 500,
        }))
    }

    /// Get the error message from the error variant
    pub fn message(&self) -> String {
        match self {
            AuthError::AccountLocked(json) => json.0.message.clone(),
            AuthError::InvalidCredentials(json) => json.0.message.clone(),
            AuthError::TotpCodeRequired(json) => json.0.message.clone(),
            AuthError::InvalidTotpCode(json) => json.0.message.clone(),
            AuthError::TotpNotConfigured(json) => json.0.message.clone(),
            AuthError::AccountNotFound(json) => json.0.message.clone(),
            AuthError::DuplicateEmail(json) => json.0.message.clone(),
            AuthError::RoleMismatch(json) => json.0.message.clone(),
            AuthError::ValidationFailed(json) => json.0.message.clone(),
            AuthError::InvalidToken(json) => json.0.message.clone(),
            AuthError::ExpiredToken(json) => json.0.message.clone(),
            AuthError::InternalError(json) => json.0.message.clone(),
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}
