use poem_openapi::{payload::Json, ApiResponse, Object};
use serde::{Deserialize, Serialize};

/// Request model for login
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Account email
    pub email: String,

    /// Account password
    pub password: String,

    /// Current 6-digit TOTP code, once two-factor setup is confirmed
    pub totp_code: Option<String>,
}

/// Response model containing the bearer token
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// JWT access token for API authentication
    pub access_token: String,

    /// Token type (always "Bearer")
    pub token_type: String,

    /// Number of seconds until the access token expires
    pub expires_in: i64,

    /// Role of the authenticated account
    pub role: String,

    /// True when the account still uses an admin-issued temporary password
    pub must_change_password: bool,
}

/// Response model returned when two-factor setup is still pending
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct TotpSetupResponse {
    /// Always true; the caller must complete TOTP enrollment
    pub need_totp: bool,

    /// otpauth:// provisioning URI to render as a QR code
    pub totp_uri: String,
}

/// API response for the login endpoint
#[derive(ApiResponse)]
pub enum LoginApiResponse {
    /// Authentication complete, bearer token issued
    #[oai(status = 200)]
    Ok(Json<TokenResponse>),

    /// Password accepted, TOTP enrollment required
    #[oai(status = 201)]
    NeedsTotpSetup(Json<TotpSetupResponse>),
}

/// Request model for confirming TOTP enrollment
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ConfirmTotpRequest {
    /// Account email
    pub email: String,

    /// 6-digit code from the authenticator app
    pub totp_code: String,
}

/// Response model for TOTP confirmation
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ConfirmTotpResponse {
    /// Confirmation message
    pub detail: String,
}

/// Request model for password change
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    /// Account email
    pub email: String,

    /// Current password for verification
    pub current_password: String,

    /// New password to set
    pub new_password: String,

    /// When true, rotate the TOTP secret along with the password
    pub reset_totp: Option<bool>,
}

/// Response model for password change
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct ChangePasswordResponse {
    /// Success message
    pub message: String,

    /// Fresh provisioning URI when the TOTP secret was rotated
    pub totp_uri: Option<String>,
}

/// Response model for the whoami endpoint
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    /// Account id
    pub account_id: String,

    /// Account email
    pub email: String,

    /// Account role
    pub role: String,

    /// Token expiration time (Unix timestamp)
    pub expires_at: i64,
}
