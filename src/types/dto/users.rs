use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Request model for client self-registration
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct RegisterClientRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,

    /// Must be "client"; self-registration is not allowed for staff roles
    pub role: String,

    pub phone_number: String,
    pub address: String,
    pub postal_code: String,
}

/// Request model for admin creation of a doctor account
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateDoctorRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,

    /// Must be "doctor"
    pub role: String,

    /// When absent, a temporary password is generated and returned once
    pub password: Option<String>,

    pub specialization: String,
    pub permit_number: String,
    pub backup_email: Option<String>,
}

/// Request model for admin creation of a consultant account
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreateConsultantRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,

    /// Must be "consultant"
    pub role: String,

    /// When absent, a temporary password is generated and returned once
    pub password: Option<String>,

    pub facility_id: i32,
    pub backup_email: Option<String>,
}

/// Output model for any account kind
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UserOut {
    pub id: i32,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub must_change_password: bool,
}

/// Response model for account creation
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct CreatedUserResponse {
    pub user: UserOut,

    /// Present only when the server generated a temporary password; it is
    /// shown exactly once and stored nowhere in plaintext
    pub temporary_password: Option<String>,
}
