pub mod logging;

use std::env;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
}

/// Application configuration, resolved once at process start.
///
/// The ledger connection parameters live here so the ledger client is
/// constructed explicitly in `main` rather than materializing lazily on
/// first use.
#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    pub jwt_secret: String,
    pub password_pepper: String,
    pub totp_issuer: String,
    pub ledger_url: String,
    pub ledger_account: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// `JWT_SECRET` and `PASSWORD_PEPPER` are required; everything else has
    /// a development default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://vetclinic.db?mode=rwc".to_string());

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let jwt_secret = env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?;

        let password_pepper =
            env::var("PASSWORD_PEPPER").map_err(|_| ConfigError::MissingVar("PASSWORD_PEPPER"))?;

        let totp_issuer = env::var("TOTP_ISSUER").unwrap_or_else(|_| "VetClinic".to_string());

        let ledger_url =
            env::var("LEDGER_URL").unwrap_or_else(|_| "http://127.0.0.1:8545".to_string());

        let ledger_account =
            env::var("LEDGER_ACCOUNT").unwrap_or_else(|_| "vetclinic-service".to_string());

        Ok(Self {
            database_url,
            bind_addr,
            jwt_secret,
            password_pepper,
            totp_issuer,
            ledger_url,
            ledger_account,
        })
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("database_url", &self.database_url)
            .field("bind_addr", &self.bind_addr)
            .field("jwt_secret", &"<redacted>")
            .field("password_pepper", &"<redacted>")
            .field("totp_issuer", &self.totp_issuer)
            .field("ledger_url", &self.ledger_url)
            .field("ledger_account", &self.ledger_account)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_does_not_expose_secrets() {
        let config = AppConfig {
            database_url: "sqlite::memory:".to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
            jwt_secret: "super-secret-jwt-key".to_string(),
            password_pepper: "super-secret-pepper".to_string(),
            totp_issuer: "VetClinic".to_string(),
            ledger_url: "http://127.0.0.1:8545".to_string(),
            ledger_account: "vetclinic-service".to_string(),
        };

        let debug_output = format!("{:?}", config);
        assert!(!debug_output.contains("super-secret-jwt-key"));
        assert!(!debug_output.contains("super-secret-pepper"));
        assert!(debug_output.contains("<redacted>"));
    }
}
