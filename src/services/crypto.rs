use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use rand::Rng;
use std::fmt;

use crate::errors::auth::AuthError;

/// One-way password hashing and verification, shared by all account kinds.
///
/// Uses Argon2id with the process-wide pepper as the secret parameter, so
/// stored hashes are useless without the deployment's pepper.
pub struct PasswordService {
    pepper: String,
}

impl PasswordService {
    pub fn new(pepper: String) -> Self {
        Self { pepper }
    }

    fn argon2(&self) -> Result<Argon2<'_>, AuthError> {
        Argon2::new_with_secret(
            self.pepper.as_bytes(),
            Algorithm::Argon2id,
            Version::V0x13,
            Params::default(),
        )
        .map_err(|e| {
            AuthError::internal_error(format!("Failed to initialize Argon2 with secret: {}", e))
        })
    }

    /// Hash a password into PHC string format
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut rand_core::OsRng);
        let hash = self
            .argon2()?
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AuthError::internal_error(format!("Password hashing error: {}", e)))?
            .to_string();
        Ok(hash)
    }

    /// Verify a password against a stored hash.
    ///
    /// An unparsable stored hash verifies as false rather than erroring, so
    /// the caller cannot distinguish it from a wrong password.
    pub fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, AuthError> {
        let parsed_hash = match PasswordHash::new(stored_hash) {
            Ok(parsed) => parsed,
            Err(_) => return Ok(false),
        };

        Ok(self
            .argon2()?
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl fmt::Debug for PasswordService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordService")
            .field("pepper", &"<redacted>")
            .finish()
    }
}

/// Generate a cryptographically secure temporary password
///
/// Generates a 20-character password with a mix of uppercase letters,
/// lowercase letters, digits, and symbols using a cryptographically
/// secure random number generator. Issued for admin-created accounts;
/// the holder must change it on first use.
pub fn generate_temporary_password() -> String {
    const PASSWORD_LENGTH: usize = 20;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                             abcdefghijklmnopqrstuvwxyz\
                             0123456789\
                             !@#$%^&*()_+-=[]{}|;:,.<>?";

    let mut rng = rand::rng();
    (0..PASSWORD_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let service = PasswordService::new("test-pepper-for-unit-tests".to_string());

        let hash = service.hash("Very$ecret!").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(service.verify("Very$ecret!", &hash).unwrap());
        assert!(!service.verify("wrong", &hash).unwrap());
    }

    #[test]
    fn test_verify_fails_with_different_pepper() {
        let service = PasswordService::new("pepper-one-secret-key".to_string());
        let other = PasswordService::new("pepper-two-secret-key".to_string());

        let hash = service.hash("same-password").unwrap();

        assert!(service.verify("same-password", &hash).unwrap());
        assert!(!other.verify("same-password", &hash).unwrap());
    }

    #[test]
    fn test_verify_tolerates_garbage_hash() {
        let service = PasswordService::new("test-pepper".to_string());

        assert!(!service.verify("password", "not-a-phc-string").unwrap());
    }

    #[test]
    fn test_debug_trait_does_not_expose_pepper() {
        let service = PasswordService::new("super-secret-pepper-value".to_string());

        let debug_output = format!("{:?}", service);
        assert!(debug_output.contains("<redacted>"));
        assert!(!debug_output.contains("super-secret-pepper-value"));
    }

    #[test]
    fn test_generate_temporary_password_length() {
        let password = generate_temporary_password();
        assert_eq!(password.len(), 20);
    }

    #[test]
    fn test_generate_temporary_password_contains_valid_characters() {
        let password = generate_temporary_password();

        assert!(password.chars().all(|c| {
            c.is_ascii_alphanumeric() || "!@#$%^&*()_+-=[]{}|;:,.<>?".contains(c)
        }));
    }

    #[test]
    fn test_generate_temporary_password_uniqueness() {
        let password1 = generate_temporary_password();
        let password2 = generate_temporary_password();

        assert_ne!(password1, password2);
    }
}
