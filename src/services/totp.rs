use rand::Rng;
use totp_rs::{Algorithm, Secret, TOTP};

use crate::errors::auth::AuthError;

const SECRET_LENGTH: usize = 32;
const BASE32_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

const DIGITS: usize = 6;
const STEP_SECONDS: u64 = 30;
// Accept the adjacent step on either side for clock skew.
const SKEW_STEPS: u8 = 1;

/// RFC 6238 TOTP provisioning and verification.
///
/// Codes are time-window bound; no replay cache is kept.
pub struct TotpService {
    issuer: String,
}

impl TotpService {
    pub fn new(issuer: String) -> Self {
        Self { issuer }
    }

    /// Generate a new shared secret, base32-encoded (A-Z, 2-7)
    pub fn new_secret(&self) -> String {
        let mut rng = rand::rng();
        (0..SECRET_LENGTH)
            .map(|_| {
                let idx = rng.random_range(0..BASE32_ALPHABET.len());
                BASE32_ALPHABET[idx] as char
            })
            .collect()
    }

    fn build(&self, secret: &str, account_label: &str) -> Result<TOTP, AuthError> {
        let secret_bytes = Secret::Encoded(secret.to_string())
            .to_bytes()
            .map_err(|e| AuthError::internal_error(format!("Invalid TOTP secret: {:?}", e)))?;

        TOTP::new(
            Algorithm::SHA1,
            DIGITS,
            SKEW_STEPS,
            STEP_SECONDS,
            secret_bytes,
            Some(self.issuer.clone()),
            account_label.to_string(),
        )
        .map_err(|e| AuthError::internal_error(format!("Failed to build TOTP: {:?}", e)))
    }

    /// Build the otpauth:// provisioning URI for rendering as a QR code
    pub fn provisioning_uri(&self, account_email: &str, secret: &str) -> Result<String, AuthError> {
        Ok(self.build(secret, account_email)?.get_url())
    }

    /// Verify a submitted code against the current time window
    pub fn verify(&self, secret: &str, submitted_code: &str) -> Result<bool, AuthError> {
        // The account label only affects the URI, not verification
        self.build(secret, "account")?
            .check_current(submitted_code)
            .map_err(|e| AuthError::internal_error(format!("System clock error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TotpService {
        TotpService::new("VetClinic".to_string())
    }

    #[test]
    fn test_new_secret_is_base32() {
        let secret = service().new_secret();

        assert_eq!(secret.len(), 32);
        assert!(secret
            .chars()
            .all(|c| c.is_ascii_uppercase() || ('2'..='7').contains(&c)));
    }

    #[test]
    fn test_new_secret_uniqueness() {
        let service = service();
        assert_ne!(service.new_secret(), service.new_secret());
    }

    #[test]
    fn test_provisioning_uri_format() {
        let service = TotpService::new("VetX".to_string());
        let secret = service.new_secret();

        let uri = service
            .provisioning_uri("alice@example.com", &secret)
            .unwrap();

        assert!(uri.starts_with("otpauth://totp/"));
        assert!(uri.contains(&format!("secret={}", secret)));
        assert!(uri.contains("issuer=VetX"));
    }

    #[test]
    fn test_verify_accepts_current_code() {
        let service = service();
        let secret = service.new_secret();

        let code = service
            .build(&secret, "account")
            .unwrap()
            .generate_current()
            .unwrap();

        assert!(service.verify(&secret, &code).unwrap());
    }

    #[test]
    fn test_verify_rejects_code_from_other_secret() {
        let service = service();
        let secret = service.new_secret();
        let other_secret = service.new_secret();

        let code = service
            .build(&other_secret, "account")
            .unwrap()
            .generate_current()
            .unwrap();

        // Six-digit collision across secrets is possible but vanishingly
        // unlikely within one window
        assert!(!service.verify(&secret, &code).unwrap());
    }

    #[test]
    fn test_verify_rejects_malformed_code() {
        let service = service();
        let secret = service.new_secret();

        assert!(!service.verify(&secret, "000").unwrap());
        assert!(!service.verify(&secret, "not-a-code").unwrap());
    }
}
