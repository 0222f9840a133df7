use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;

use crate::errors::auth::AuthError;
use crate::types::internal::Claims;

/// Manages bearer token generation and validation
pub struct TokenService {
    jwt_secret: String,
    default_expiration_minutes: i64,
}

impl TokenService {
    /// Create a new TokenService with the given JWT secret
    pub fn new(jwt_secret: String) -> Self {
        Self {
            jwt_secret,
            default_expiration_minutes: 60,
        }
    }

    /// Generate a bearer token carrying account id, email and role.
    ///
    /// Expires after one hour unless `expires_delta` overrides it.
    pub fn create_access_token(
        &self,
        account_id: i32,
        email: &str,
        role: &str,
        expires_delta: Option<Duration>,
    ) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let lifetime_seconds = expires_delta
            .map(|d| d.num_seconds())
            .unwrap_or(self.default_expiration_minutes * 60);

        let claims = Claims {
            sub: account_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            exp: now + lifetime_seconds,
            iat: now,
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| AuthError::internal_error(format!("Failed to generate JWT: {}", e)))
    }

    /// Validate a bearer token and return the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|e| {
            if e.to_string().contains("ExpiredSignature") {
                AuthError::expired_token()
            } else {
                AuthError::invalid_token()
            }
        })?;

        Ok(token_data.claims)
    }

    /// Default token lifetime in seconds
    pub fn default_expires_in(&self) -> i64 {
        self.default_expiration_minutes * 60
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("jwt_secret", &"<redacted>")
            .field("default_expiration_minutes", &self.default_expiration_minutes)
            .finish()
    }
}

impl fmt::Display for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TokenService {{ default_expiration: {}min }}",
            self.default_expiration_minutes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-minimum-32-characters-long";

    fn service() -> TokenService {
        TokenService::new(TEST_SECRET.to_string())
    }

    #[test]
    fn test_token_roundtrip_carries_identity() {
        let token_service = service();

        let token = token_service
            .create_access_token(42, "alice@example.com", "doctor", None)
            .unwrap();
        let claims = token_service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.role, "doctor");
    }

    #[test]
    fn test_default_expiration_is_one_hour() {
        let token_service = service();

        let token = token_service
            .create_access_token(1, "a@b.com", "client", None)
            .unwrap();
        let claims = token_service.validate_token(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_custom_expiration_overrides_default() {
        let token_service = service();

        let token = token_service
            .create_access_token(1, "a@b.com", "client", Some(Duration::minutes(5)))
            .unwrap();
        let claims = token_service.validate_token(&token).unwrap();

        assert_eq!(claims.exp - claims.iat, 300);
    }

    #[test]
    fn test_iat_is_current_time() {
        let token_service = service();

        let before = Utc::now().timestamp();
        let token = token_service
            .create_access_token(1, "a@b.com", "client", None)
            .unwrap();
        let after = Utc::now().timestamp();

        let claims = token_service.validate_token(&token).unwrap();
        assert!(claims.iat >= before);
        assert!(claims.iat <= after);
    }

    #[test]
    fn test_validate_fails_with_wrong_secret() {
        let token_service = service();
        let wrong_service = TokenService::new("wrong-secret-key-minimum-32-characters".to_string());

        let token = token_service
            .create_access_token(1, "a@b.com", "client", None)
            .unwrap();

        let result = wrong_service.validate_token(&token);
        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_validate_fails_with_expired_token() {
        let token_service = service();

        let token = token_service
            .create_access_token(1, "a@b.com", "client", Some(Duration::hours(-1)))
            .unwrap();

        let result = token_service.validate_token(&token);
        assert!(matches!(result, Err(AuthError::ExpiredToken(_))));
    }

    #[test]
    fn test_debug_trait_does_not_expose_jwt_secret() {
        let token_service = service();

        let debug_output = format!("{:?}", token_service);
        assert!(!debug_output.contains(TEST_SECRET));
        assert!(debug_output.contains("<redacted>"));
        assert!(debug_output.contains("TokenService"));
    }
}
