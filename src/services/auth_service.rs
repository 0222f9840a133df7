use chrono::Utc;
use std::sync::Arc;

use crate::errors::auth::AuthError;
use crate::services::{PasswordService, TokenService, TotpService};
use crate::stores::AccountStore;

/// Consecutive password failures before an account is locked
pub const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Lockout duration once the threshold is reached
pub const LOCKOUT_MINUTES: i64 = 15;

/// Outcome of a login attempt whose password check succeeded
pub enum LoginOutcome {
    /// TOTP enrollment pending; the caller must scan the URI and confirm
    SetupRequired { totp_uri: String },

    /// Fully authenticated
    Authenticated {
        access_token: String,
        role: String,
        must_change_password: bool,
        expires_in: i64,
    },
}

/// Orchestrates the login flow over the credential store: lockout check,
/// password verification with failure accounting, TOTP provisioning and
/// verification, token issuance.
pub struct AuthService {
    accounts: Arc<AccountStore>,
    passwords: Arc<PasswordService>,
    totp: Arc<TotpService>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(
        accounts: Arc<AccountStore>,
        passwords: Arc<PasswordService>,
        totp: Arc<TotpService>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            accounts,
            passwords,
            totp,
            tokens,
        }
    }

    /// Run one login attempt.
    ///
    /// Branches, in order: locked -> rejected with remaining minutes, no
    /// state change; bad password -> failure counter (lockout at the
    /// threshold); correct password -> counters reset, lock cleared; then
    /// TOTP provisioning/verification gates token issuance.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        totp_code: Option<&str>,
        force_provision: bool,
    ) -> Result<LoginOutcome, AuthError> {
        let now = Utc::now().timestamp();

        let Some(mut account) = self.accounts.find_by_email(email).await? else {
            // Uniform rejection; a missing account must read exactly like a
            // wrong password
            return Err(AuthError::invalid_credentials());
        };

        if let Some(locked_until) = account.locked_until {
            if locked_until > now {
                let remaining_minutes = (locked_until - now) / 60 + 1;
                return Err(AuthError::account_locked(remaining_minutes));
            }
        }

        if !self.passwords.verify(password, &account.password_hash)? {
            account.failed_login_attempts += 1;
            if account.failed_login_attempts >= MAX_FAILED_ATTEMPTS {
                account.locked_until = Some(now + LOCKOUT_MINUTES * 60);
                account.failed_login_attempts = 0;
            }
            self.accounts.persist_auth_state(&account).await?;
            return Err(AuthError::invalid_credentials());
        }

        // Successful password check resets the lockout accounting, even if
        // the TOTP step fails afterwards
        account.failed_login_attempts = 0;
        account.locked_until = None;
        self.accounts.persist_auth_state(&account).await?;

        if force_provision || account.totp_secret.is_none() {
            account.totp_secret = Some(self.totp.new_secret());
            account.totp_confirmed = false;
            self.accounts.persist_auth_state(&account).await?;
        }

        let secret = account
            .totp_secret
            .as_deref()
            .ok_or_else(|| AuthError::internal_error("TOTP secret missing after provisioning".to_string()))?;

        if totp_code.is_none() || !account.totp_confirmed {
            if !account.totp_confirmed {
                let totp_uri = self.totp.provisioning_uri(&account.email, secret)?;
                return Ok(LoginOutcome::SetupRequired { totp_uri });
            }
            return Err(AuthError::totp_code_required());
        }

        let code = totp_code.unwrap_or_default();
        if !self.totp.verify(secret, code)? {
            return Err(AuthError::invalid_totp_code());
        }

        let access_token =
            self.tokens
                .create_access_token(account.id, &account.email, account.kind.as_str(), None)?;

        Ok(LoginOutcome::Authenticated {
            access_token,
            role: account.kind.as_str().to_string(),
            must_change_password: account.must_change_password,
            expires_in: self.tokens.default_expires_in(),
        })
    }

    /// Rotate the TOTP secret out of band and return a fresh provisioning
    /// URI. The new secret is unconfirmed until `confirm_totp` succeeds.
    pub async fn setup_totp(&self, email: &str) -> Result<String, AuthError> {
        let Some(mut account) = self.accounts.find_by_email(email).await? else {
            return Err(AuthError::account_not_found());
        };

        let secret = self.totp.new_secret();
        let totp_uri = self.totp.provisioning_uri(&account.email, &secret)?;

        account.totp_secret = Some(secret);
        account.totp_confirmed = false;
        self.accounts.persist_auth_state(&account).await?;

        Ok(totp_uri)
    }

    /// Confirm TOTP enrollment with a code generated from the provisioned
    /// secret. This is the only path that sets `totp_confirmed`.
    pub async fn confirm_totp(&self, email: &str, totp_code: &str) -> Result<(), AuthError> {
        let Some(mut account) = self.accounts.find_by_email(email).await? else {
            return Err(AuthError::account_not_found());
        };

        let Some(secret) = account.totp_secret.clone() else {
            return Err(AuthError::totp_not_configured());
        };

        if !self.totp.verify(&secret, totp_code)? {
            return Err(AuthError::invalid_totp_code());
        }

        account.totp_confirmed = true;
        self.accounts.persist_auth_state(&account).await?;

        Ok(())
    }

    /// Replace the account password after verifying the current one.
    ///
    /// Clears `must_change_password`. When `reset_totp` is set the TOTP
    /// secret is rotated and the fresh provisioning URI returned.
    pub async fn change_password(
        &self,
        email: &str,
        current_password: &str,
        new_password: &str,
        reset_totp: bool,
    ) -> Result<Option<String>, AuthError> {
        let Some(mut account) = self.accounts.find_by_email(email).await? else {
            return Err(AuthError::invalid_credentials());
        };

        if !self
            .passwords
            .verify(current_password, &account.password_hash)?
        {
            return Err(AuthError::invalid_credentials());
        }

        account.password_hash = self.passwords.hash(new_password)?;
        account.must_change_password = false;

        let mut totp_uri = None;
        if reset_totp {
            let secret = self.totp.new_secret();
            totp_uri = Some(self.totp.provisioning_uri(&account.email, &secret)?);
            account.totp_secret = Some(secret);
            account.totp_confirmed = false;
        }

        self.accounts.persist_auth_state(&account).await?;

        Ok(totp_uri)
    }
}
