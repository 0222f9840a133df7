use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use std::sync::Arc;

use crate::errors::auth::AuthError;
use crate::services::crypto::generate_temporary_password;
use crate::services::PasswordService;
use crate::types::db::{client, consultant, doctor, facility};
use crate::types::internal::{AccountKind, AuthAccount};

fn db_error(e: sea_orm::DbErr) -> AuthError {
    AuthError::internal_error(format!("Database error: {}", e))
}

/// Parameters for client self-registration
pub struct NewClient {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
    pub address: String,
    pub postal_code: String,
}

/// Parameters for admin creation of a doctor account
pub struct NewDoctor {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// When absent, a temporary password is generated
    pub password: Option<String>,
    pub specialization: String,
    pub permit_number: String,
    pub backup_email: Option<String>,
}

/// Parameters for admin creation of a consultant account
pub struct NewConsultant {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// When absent, a temporary password is generated
    pub password: Option<String>,
    pub facility_id: i32,
    pub backup_email: Option<String>,
}

/// Credential store over the three disjoint account tables.
///
/// Emails identify an account across all kinds, so lookups probe clients,
/// doctors and consultants in that order and creation rejects an email
/// already present in any of the three.
pub struct AccountStore {
    db: DatabaseConnection,
    passwords: Arc<PasswordService>,
}

impl AccountStore {
    pub fn new(db: DatabaseConnection, passwords: Arc<PasswordService>) -> Self {
        Self { db, passwords }
    }

    /// Union lookup across all account kinds. Absence is not an error.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<AuthAccount>, AuthError> {
        if let Some(found) = client::Entity::find()
            .filter(client::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_error)?
        {
            return Ok(Some(found.into()));
        }

        if let Some(found) = doctor::Entity::find()
            .filter(doctor::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_error)?
        {
            return Ok(Some(found.into()));
        }

        if let Some(found) = consultant::Entity::find()
            .filter(consultant::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_error)?
        {
            return Ok(Some(found.into()));
        }

        Ok(None)
    }

    async fn email_exists(&self, email: &str) -> Result<bool, AuthError> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    /// Create a client account with a caller-chosen password
    pub async fn create_client(&self, data: NewClient) -> Result<client::Model, AuthError> {
        if self.email_exists(&data.email).await? {
            return Err(AuthError::duplicate_email());
        }

        let password_hash = self.passwords.hash(&data.password)?;

        let new_client = client::ActiveModel {
            first_name: Set(data.first_name),
            last_name: Set(data.last_name),
            email: Set(data.email),
            password_hash: Set(password_hash),
            phone_number: Set(data.phone_number),
            address: Set(data.address),
            postal_code: Set(data.postal_code),
            created_at: Set(Utc::now().timestamp()),
            totp_secret: Set(None),
            totp_confirmed: Set(false),
            failed_login_attempts: Set(0),
            locked_until: Set(None),
            must_change_password: Set(false),
            ..Default::default()
        };

        new_client.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                AuthError::duplicate_email()
            } else {
                db_error(e)
            }
        })
    }

    /// Create a doctor account. Returns the generated temporary password
    /// when the caller supplied none; the holder must change it.
    pub async fn create_doctor(
        &self,
        data: NewDoctor,
    ) -> Result<(doctor::Model, Option<String>), AuthError> {
        if self.email_exists(&data.email).await? {
            return Err(AuthError::duplicate_email());
        }

        let (password, temporary_password) = match data.password {
            Some(password) => (password, None),
            None => {
                let generated = generate_temporary_password();
                (generated.clone(), Some(generated))
            }
        };
        let must_change_password = temporary_password.is_some();
        let password_hash = self.passwords.hash(&password)?;

        let new_doctor = doctor::ActiveModel {
            first_name: Set(data.first_name),
            last_name: Set(data.last_name),
            email: Set(data.email),
            password_hash: Set(password_hash),
            specialization: Set(data.specialization),
            permit_number: Set(data.permit_number),
            backup_email: Set(data.backup_email),
            created_at: Set(Utc::now().timestamp()),
            totp_secret: Set(None),
            totp_confirmed: Set(false),
            failed_login_attempts: Set(0),
            locked_until: Set(None),
            must_change_password: Set(must_change_password),
            ..Default::default()
        };

        let created = new_doctor.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                AuthError::duplicate_email()
            } else {
                db_error(e)
            }
        })?;

        Ok((created, temporary_password))
    }

    /// Create a consultant account attached to an existing facility
    pub async fn create_consultant(
        &self,
        data: NewConsultant,
    ) -> Result<(consultant::Model, Option<String>), AuthError> {
        if self.email_exists(&data.email).await? {
            return Err(AuthError::duplicate_email());
        }

        let facility_exists = facility::Entity::find_by_id(data.facility_id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .is_some();
        if !facility_exists {
            return Err(AuthError::validation_failed(format!(
                "Facility {} does not exist",
                data.facility_id
            )));
        }

        let (password, temporary_password) = match data.password {
            Some(password) => (password, None),
            None => {
                let generated = generate_temporary_password();
                (generated.clone(), Some(generated))
            }
        };
        let must_change_password = temporary_password.is_some();
        let password_hash = self.passwords.hash(&password)?;

        let new_consultant = consultant::ActiveModel {
            first_name: Set(data.first_name),
            last_name: Set(data.last_name),
            email: Set(data.email),
            password_hash: Set(password_hash),
            facility_id: Set(data.facility_id),
            backup_email: Set(data.backup_email),
            created_at: Set(Utc::now().timestamp()),
            totp_secret: Set(None),
            totp_confirmed: Set(false),
            failed_login_attempts: Set(0),
            locked_until: Set(None),
            must_change_password: Set(must_change_password),
            ..Default::default()
        };

        let created = new_consultant.insert(&self.db).await.map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                AuthError::duplicate_email()
            } else {
                db_error(e)
            }
        })?;

        Ok((created, temporary_password))
    }

    /// Write the shared authentication columns back to the owning table
    pub async fn persist_auth_state(&self, account: &AuthAccount) -> Result<(), AuthError> {
        match account.kind {
            AccountKind::Client => {
                let model = client::Entity::find_by_id(account.id)
                    .one(&self.db)
                    .await
                    .map_err(db_error)?
                    .ok_or_else(AuthError::account_not_found)?;

                let mut active: client::ActiveModel = model.into();
                active.password_hash = Set(account.password_hash.clone());
                active.must_change_password = Set(account.must_change_password);
                active.totp_secret = Set(account.totp_secret.clone());
                active.totp_confirmed = Set(account.totp_confirmed);
                active.failed_login_attempts = Set(account.failed_login_attempts);
                active.locked_until = Set(account.locked_until);
                active.update(&self.db).await.map_err(db_error)?;
            }
            AccountKind::Doctor => {
                let model = doctor::Entity::find_by_id(account.id)
                    .one(&self.db)
                    .await
                    .map_err(db_error)?
                    .ok_or_else(AuthError::account_not_found)?;

                let mut active: doctor::ActiveModel = model.into();
                active.password_hash = Set(account.password_hash.clone());
                active.must_change_password = Set(account.must_change_password);
                active.totp_secret = Set(account.totp_secret.clone());
                active.totp_confirmed = Set(account.totp_confirmed);
                active.failed_login_attempts = Set(account.failed_login_attempts);
                active.locked_until = Set(account.locked_until);
                active.update(&self.db).await.map_err(db_error)?;
            }
            AccountKind::Consultant => {
                let model = consultant::Entity::find_by_id(account.id)
                    .one(&self.db)
                    .await
                    .map_err(db_error)?
                    .ok_or_else(AuthError::account_not_found)?;

                let mut active: consultant::ActiveModel = model.into();
                active.password_hash = Set(account.password_hash.clone());
                active.must_change_password = Set(account.must_change_password);
                active.totp_secret = Set(account.totp_secret.clone());
                active.totp_confirmed = Set(account.totp_confirmed);
                active.failed_login_attempts = Set(account.failed_login_attempts);
                active.locked_until = Set(account.locked_until);
                active.update(&self.db).await.map_err(db_error)?;
            }
        }

        Ok(())
    }

    pub async fn list_clients(&self) -> Result<Vec<client::Model>, AuthError> {
        client::Entity::find().all(&self.db).await.map_err(db_error)
    }

    pub async fn list_doctors(&self) -> Result<Vec<doctor::Model>, AuthError> {
        doctor::Entity::find().all(&self.db).await.map_err(db_error)
    }

    pub async fn list_consultants(&self) -> Result<Vec<consultant::Model>, AuthError> {
        consultant::Entity::find()
            .all(&self.db)
            .await
            .map_err(db_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup_store() -> AccountStore {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        let passwords = Arc::new(PasswordService::new("test-pepper-for-unit-tests".to_string()));
        AccountStore::new(db, passwords)
    }

    fn client_data(email: &str) -> NewClient {
        NewClient {
            first_name: "Anna".to_string(),
            last_name: "Nowak".to_string(),
            email: email.to_string(),
            password: "correct-horse-battery".to_string(),
            phone_number: "+48123456789".to_string(),
            address: "ul. Polna 1".to_string(),
            postal_code: "00-001 Warszawa".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_client_initializes_auth_state() {
        let store = setup_store().await;

        let created = store.create_client(client_data("anna@example.com")).await.unwrap();

        assert!(created.password_hash.starts_with("$argon2"));
        assert_eq!(created.failed_login_attempts, 0);
        assert!(created.locked_until.is_none());
        assert!(created.totp_secret.is_none());
        assert!(!created.totp_confirmed);
        assert!(!created.must_change_password);
    }

    #[tokio::test]
    async fn test_create_client_rejects_duplicate_email() {
        let store = setup_store().await;

        store.create_client(client_data("dup@example.com")).await.unwrap();
        let result = store.create_client(client_data("dup@example.com")).await;

        assert!(matches!(result, Err(AuthError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_union_lookup_finds_each_kind() {
        let store = setup_store().await;

        store.create_client(client_data("client@example.com")).await.unwrap();

        let (_, temp) = store
            .create_doctor(NewDoctor {
                first_name: "Jan".to_string(),
                last_name: "Kowalski".to_string(),
                email: "doctor@example.com".to_string(),
                password: None,
                specialization: "Surgery".to_string(),
                permit_number: "1234567".to_string(),
                backup_email: None,
            })
            .await
            .unwrap();
        assert!(temp.is_some());

        let found = store.find_by_email("client@example.com").await.unwrap().unwrap();
        assert_eq!(found.kind, AccountKind::Client);

        let found = store.find_by_email("doctor@example.com").await.unwrap().unwrap();
        assert_eq!(found.kind, AccountKind::Doctor);
        assert!(found.must_change_password);

        assert!(store.find_by_email("nobody@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected_across_kinds() {
        let store = setup_store().await;

        store.create_client(client_data("shared@example.com")).await.unwrap();

        let result = store
            .create_doctor(NewDoctor {
                first_name: "Jan".to_string(),
                last_name: "Kowalski".to_string(),
                email: "shared@example.com".to_string(),
                password: Some("chosen-password-123".to_string()),
                specialization: "Dermatology".to_string(),
                permit_number: "7654321".to_string(),
                backup_email: None,
            })
            .await;

        assert!(matches!(result, Err(AuthError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_create_consultant_requires_existing_facility() {
        let store = setup_store().await;

        let result = store
            .create_consultant(NewConsultant {
                first_name: "Ewa".to_string(),
                last_name: "Lis".to_string(),
                email: "ewa@example.com".to_string(),
                password: None,
                facility_id: 99,
                backup_email: None,
            })
            .await;

        assert!(matches!(result, Err(AuthError::ValidationFailed(_))));
    }

    #[tokio::test]
    async fn test_persist_auth_state_roundtrip() {
        let store = setup_store().await;

        store.create_client(client_data("state@example.com")).await.unwrap();
        let mut account = store.find_by_email("state@example.com").await.unwrap().unwrap();

        account.failed_login_attempts = 3;
        account.locked_until = Some(1_900_000_000);
        account.totp_secret = Some("JBSWY3DPEHPK3PXPJBSWY3DPEHPK3PXP".to_string());
        account.totp_confirmed = true;
        store.persist_auth_state(&account).await.unwrap();

        let reloaded = store.find_by_email("state@example.com").await.unwrap().unwrap();
        assert_eq!(reloaded.failed_login_attempts, 3);
        assert_eq!(reloaded.locked_until, Some(1_900_000_000));
        assert!(reloaded.totp_confirmed);
        assert_eq!(
            reloaded.totp_secret.as_deref(),
            Some("JBSWY3DPEHPK3PXPJBSWY3DPEHPK3PXP")
        );
    }
}
