use std::fmt;

use crate::types::db::{client, consultant, doctor};

/// The three disjoint account kinds. Accounts live in separate tables but
/// share one authentication surface; the kind doubles as the role claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    Client,
    Doctor,
    Consultant,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Client => "client",
            AccountKind::Doctor => "doctor",
            AccountKind::Consultant => "consultant",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authentication view of an account, independent of kind.
///
/// Produced by the union lookup over the three account tables and written
/// back through `AccountStore::persist_auth_state`. Invariants maintained by
/// the login flow: `totp_confirmed` implies `totp_secret` is set;
/// `failed_login_attempts` is zeroed whenever `locked_until` is set and
/// whenever a password check succeeds; `locked_until` is cleared exactly on
/// a successful password check.
#[derive(Clone, PartialEq)]
pub struct AuthAccount {
    pub id: i32,
    pub kind: AccountKind,
    pub email: String,
    pub password_hash: String,
    pub must_change_password: bool,
    pub totp_secret: Option<String>,
    pub totp_confirmed: bool,
    pub failed_login_attempts: i32,
    pub locked_until: Option<i64>,
}

impl fmt::Debug for AuthAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthAccount")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("must_change_password", &self.must_change_password)
            .field("totp_secret", &self.totp_secret.as_ref().map(|_| "<redacted>"))
            .field("totp_confirmed", &self.totp_confirmed)
            .field("failed_login_attempts", &self.failed_login_attempts)
            .field("locked_until", &self.locked_until)
            .finish()
    }
}

impl From<client::Model> for AuthAccount {
    fn from(m: client::Model) -> Self {
        Self {
            id: m.id,
            kind: AccountKind::Client,
            email: m.email,
            password_hash: m.password_hash,
            must_change_password: m.must_change_password,
            totp_secret: m.totp_secret,
            totp_confirmed: m.totp_confirmed,
            failed_login_attempts: m.failed_login_attempts,
            locked_until: m.locked_until,
        }
    }
}

impl From<doctor::Model> for AuthAccount {
    fn from(m: doctor::Model) -> Self {
        Self {
            id: m.id,
            kind: AccountKind::Doctor,
            email: m.email,
            password_hash: m.password_hash,
            must_change_password: m.must_change_password,
            totp_secret: m.totp_secret,
            totp_confirmed: m.totp_confirmed,
            failed_login_attempts: m.failed_login_attempts,
            locked_until: m.locked_until,
        }
    }
}

impl From<consultant::Model> for AuthAccount {
    fn from(m: consultant::Model) -> Self {
        Self {
            id: m.id,
            kind: AccountKind::Consultant,
            email: m.email,
            password_hash: m.password_hash,
            must_change_password: m.must_change_password,
            totp_secret: m.totp_secret,
            totp_confirmed: m.totp_confirmed,
            failed_login_attempts: m.failed_login_attempts,
            locked_until: m.locked_until,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_kind_role_strings() {
        assert_eq!(AccountKind::Client.as_str(), "client");
        assert_eq!(AccountKind::Doctor.as_str(), "doctor");
        assert_eq!(AccountKind::Consultant.as_str(), "consultant");
    }

    #[test]
    fn test_debug_does_not_expose_secrets() {
        let account = AuthAccount {
            id: 1,
            kind: AccountKind::Client,
            email: "a@b.com".to_string(),
            password_hash: "$argon2id$super-secret-hash".to_string(),
            must_change_password: false,
            totp_secret: Some("JBSWY3DPEHPK3PXP".to_string()),
            totp_confirmed: true,
            failed_login_attempts: 0,
            locked_until: None,
        };

        let debug_output = format!("{:?}", account);
        assert!(!debug_output.contains("super-secret-hash"));
        assert!(!debug_output.contains("JBSWY3DPEHPK3PXP"));
        assert!(debug_output.contains("<redacted>"));
    }
}
