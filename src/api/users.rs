use poem_openapi::{auth::Bearer, param::Query, payload::Json, OpenApi, SecurityScheme, Tags};
use std::sync::Arc;

use crate::errors::auth::AuthError;
use crate::services::{validation, AuthService, LoginOutcome, TokenService};
use crate::stores::account_store::{NewClient, NewConsultant, NewDoctor};
use crate::stores::AccountStore;
use crate::types::dto::auth::{
    ChangePasswordRequest, ChangePasswordResponse, ConfirmTotpRequest, ConfirmTotpResponse,
    LoginApiResponse, LoginRequest, TokenResponse, TotpSetupResponse, WhoAmIResponse,
};
use crate::types::dto::users::{
    CreateConsultantRequest, CreateDoctorRequest, CreatedUserResponse, RegisterClientRequest,
    UserOut,
};

/// Accounts and authentication API
pub struct UsersApi {
    accounts: Arc<AccountStore>,
    auth: Arc<AuthService>,
    tokens: Arc<TokenService>,
}

impl UsersApi {
    pub fn new(
        accounts: Arc<AccountStore>,
        auth: Arc<AuthService>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            accounts,
            auth,
            tokens,
        }
    }
}

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(Bearer);

/// API tags for account endpoints
#[derive(Tags)]
enum UserTags {
    /// Account management endpoints
    Users,
    /// Authentication endpoints
    Authentication,
}

#[OpenApi(prefix_path = "/users")]
impl UsersApi {
    /// Register a new client account; staff accounts are admin-created
    #[oai(path = "/register", method = "post", tag = "UserTags::Users")]
    async fn register(
        &self,
        body: Json<RegisterClientRequest>,
    ) -> Result<Json<CreatedUserResponse>, AuthError> {
        if body.role != "client" {
            return Err(AuthError::role_mismatch(
                "Self registration is allowed only for clients".to_string(),
            ));
        }

        validation::validate_letters("First name", &body.first_name)
            .map_err(AuthError::validation_failed)?;
        validation::validate_letters("Last name", &body.last_name)
            .map_err(AuthError::validation_failed)?;
        validation::validate_phone_number(&body.phone_number)
            .map_err(AuthError::validation_failed)?;
        validation::validate_postal_code(&body.postal_code)
            .map_err(AuthError::validation_failed)?;

        let created = self
            .accounts
            .create_client(NewClient {
                first_name: body.first_name.clone(),
                last_name: body.last_name.clone(),
                email: body.email.clone(),
                password: body.password.clone(),
                phone_number: body.phone_number.clone(),
                address: body.address.clone(),
                postal_code: body.postal_code.clone(),
            })
            .await?;

        Ok(Json(CreatedUserResponse {
            user: UserOut {
                id: created.id,
                role: "client".to_string(),
                first_name: created.first_name,
                last_name: created.last_name,
                email: created.email,
                must_change_password: created.must_change_password,
            },
            temporary_password: None,
        }))
    }

    /// Create a doctor account
    #[oai(path = "/create-doctor", method = "post", tag = "UserTags::Users")]
    async fn create_doctor(
        &self,
        body: Json<CreateDoctorRequest>,
    ) -> Result<Json<CreatedUserResponse>, AuthError> {
        if body.role != "doctor" {
            return Err(AuthError::role_mismatch(
                "Role must be 'doctor'".to_string(),
            ));
        }

        validation::validate_letters("First name", &body.first_name)
            .map_err(AuthError::validation_failed)?;
        validation::validate_letters("Last name", &body.last_name)
            .map_err(AuthError::validation_failed)?;
        validation::validate_permit_number(&body.permit_number)
            .map_err(AuthError::validation_failed)?;

        let (created, temporary_password) = self
            .accounts
            .create_doctor(NewDoctor {
                first_name: body.first_name.clone(),
                last_name: body.last_name.clone(),
                email: body.email.clone(),
                password: body.password.clone(),
                specialization: body.specialization.clone(),
                permit_number: body.permit_number.clone(),
                backup_email: body.backup_email.clone(),
            })
            .await?;

        Ok(Json(CreatedUserResponse {
            user: UserOut {
                id: created.id,
                role: "doctor".to_string(),
                first_name: created.first_name,
                last_name: created.last_name,
                email: created.email,
                must_change_password: created.must_change_password,
            },
            temporary_password,
        }))
    }

    /// Create a consultant account attached to a facility
    #[oai(path = "/create-consultant", method = "post", tag = "UserTags::Users")]
    async fn create_consultant(
        &self,
        body: Json<CreateConsultantRequest>,
    ) -> Result<Json<CreatedUserResponse>, AuthError> {
        if body.role != "consultant" {
            return Err(AuthError::role_mismatch(
                "Role must be 'consultant'".to_string(),
            ));
        }

        validation::validate_letters("First name", &body.first_name)
            .map_err(AuthError::validation_failed)?;
        validation::validate_letters("Last name", &body.last_name)
            .map_err(AuthError::validation_failed)?;

        let (created, temporary_password) = self
            .accounts
            .create_consultant(NewConsultant {
                first_name: body.first_name.clone(),
                last_name: body.last_name.clone(),
                email: body.email.clone(),
                password: body.password.clone(),
                facility_id: body.facility_id,
                backup_email: body.backup_email.clone(),
            })
            .await?;

        Ok(Json(CreatedUserResponse {
            user: UserOut {
                id: created.id,
                role: "consultant".to_string(),
                first_name: created.first_name,
                last_name: created.last_name,
                email: created.email,
                must_change_password: created.must_change_password,
            },
            temporary_password,
        }))
    }

    /// List accounts of all kinds
    #[oai(path = "/", method = "get", tag = "UserTags::Users")]
    async fn list_users(&self) -> Result<Json<Vec<UserOut>>, AuthError> {
        let mut users = Vec::new();

        for m in self.accounts.list_clients().await? {
            users.push(UserOut {
                id: m.id,
                role: "client".to_string(),
                first_name: m.first_name,
                last_name: m.last_name,
                email: m.email,
                must_change_password: m.must_change_password,
            });
        }
        for m in self.accounts.list_doctors().await? {
            users.push(UserOut {
                id: m.id,
                role: "doctor".to_string(),
                first_name: m.first_name,
                last_name: m.last_name,
                email: m.email,
                must_change_password: m.must_change_password,
            });
        }
        for m in self.accounts.list_consultants().await? {
            users.push(UserOut {
                id: m.id,
                role: "consultant".to_string(),
                first_name: m.first_name,
                last_name: m.last_name,
                email: m.email,
                must_change_password: m.must_change_password,
            });
        }

        Ok(Json(users))
    }

    /// Login with email, password and (once enrolled) a TOTP code.
    ///
    /// Returns 200 with a bearer token, or 201 with a provisioning URI
    /// while TOTP enrollment is pending. `force_provision=true` rotates
    /// the secret and restarts enrollment.
    #[oai(path = "/login", method = "post", tag = "UserTags::Authentication")]
    async fn login(
        &self,
        body: Json<LoginRequest>,
        force_provision: Query<Option<bool>>,
    ) -> Result<LoginApiResponse, AuthError> {
        let outcome = self
            .auth
            .login(
                &body.email,
                &body.password,
                body.totp_code.as_deref(),
                force_provision.0.unwrap_or(false),
            )
            .await?;

        match outcome {
            LoginOutcome::SetupRequired { totp_uri } => Ok(LoginApiResponse::NeedsTotpSetup(
                Json(TotpSetupResponse {
                    need_totp: true,
                    totp_uri,
                }),
            )),
            LoginOutcome::Authenticated {
                access_token,
                role,
                must_change_password,
                expires_in,
            } => Ok(LoginApiResponse::Ok(Json(TokenResponse {
                access_token,
                token_type: "Bearer".to_string(),
                expires_in,
                role,
                must_change_password,
            }))),
        }
    }

    /// Rotate the TOTP secret and return a fresh provisioning URI
    #[oai(path = "/setup-totp", method = "post", tag = "UserTags::Authentication")]
    async fn setup_totp(
        &self,
        email: Query<String>,
    ) -> Result<Json<TotpSetupResponse>, AuthError> {
        let totp_uri = self.auth.setup_totp(&email.0).await?;

        Ok(Json(TotpSetupResponse {
            need_totp: true,
            totp_uri,
        }))
    }

    /// Confirm TOTP enrollment with a code from the authenticator app
    #[oai(path = "/confirm-totp", method = "post", tag = "UserTags::Authentication")]
    async fn confirm_totp(
        &self,
        body: Json<ConfirmTotpRequest>,
    ) -> Result<Json<ConfirmTotpResponse>, AuthError> {
        self.auth.confirm_totp(&body.email, &body.totp_code).await?;

        Ok(Json(ConfirmTotpResponse {
            detail: "TOTP confirmed".to_string(),
        }))
    }

    /// Change the account password, optionally rotating the TOTP secret
    #[oai(path = "/change-password", method = "post", tag = "UserTags::Authentication")]
    async fn change_password(
        &self,
        body: Json<ChangePasswordRequest>,
    ) -> Result<Json<ChangePasswordResponse>, AuthError> {
        let totp_uri = self
            .auth
            .change_password(
                &body.email,
                &body.current_password,
                &body.new_password,
                body.reset_totp.unwrap_or(false),
            )
            .await?;

        Ok(Json(ChangePasswordResponse {
            message: "Password changed".to_string(),
            totp_uri,
        }))
    }

    /// Verify the bearer token and return its claims
    #[oai(path = "/whoami", method = "get", tag = "UserTags::Authentication")]
    async fn whoami(&self, auth: BearerAuth) -> Result<Json<WhoAmIResponse>, AuthError> {
        let claims = self.tokens.validate_token(&auth.0.token)?;

        Ok(Json(WhoAmIResponse {
            account_id: claims.sub,
            email: claims.email,
            role: claims.role,
            expires_at: claims.exp,
        }))
    }
}
