// Common test utilities for integration tests

use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use std::sync::Arc;

use vetclinic_backend::services::{AuthService, PasswordService, TokenService, TotpService};
use vetclinic_backend::stores::account_store::NewClient;
use vetclinic_backend::stores::AccountStore;
use vetclinic_backend::types::db::{animal, appointment, client, doctor};

pub const TEST_PEPPER: &str = "integration-test-pepper";
pub const TEST_JWT_SECRET: &str = "integration-test-secret-minimum-32-chars";
pub const TEST_ISSUER: &str = "VetClinic";

/// Creates a test database with migrations applied
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

/// Everything the login-flow tests need, wired the way main() wires it
pub struct AuthHarness {
    pub db: DatabaseConnection,
    pub accounts: Arc<AccountStore>,
    pub auth: Arc<AuthService>,
    pub tokens: Arc<TokenService>,
}

pub async fn setup_auth() -> AuthHarness {
    let db = setup_test_db().await;

    let passwords = Arc::new(PasswordService::new(TEST_PEPPER.to_string()));
    let totp = Arc::new(TotpService::new(TEST_ISSUER.to_string()));
    let tokens = Arc::new(TokenService::new(TEST_JWT_SECRET.to_string()));
    let accounts = Arc::new(AccountStore::new(db.clone(), passwords.clone()));
    let auth = Arc::new(AuthService::new(
        accounts.clone(),
        passwords,
        totp,
        tokens.clone(),
    ));

    AuthHarness {
        db,
        accounts,
        auth,
        tokens,
    }
}

/// Register a client account and return its email
pub async fn register_client(harness: &AuthHarness, email: &str, password: &str) {
    harness
        .accounts
        .create_client(NewClient {
            first_name: "Anna".to_string(),
            last_name: "Nowak".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            phone_number: "+48123456789".to_string(),
            address: "ul. Polna 1".to_string(),
            postal_code: "00-001 Warszawa".to_string(),
        })
        .await
        .expect("Failed to register client");
}

/// Seed a client, doctor, animal and appointment; returns
/// (appointment_id, animal_id)
pub async fn seed_clinic(db: &DatabaseConnection) -> (i32, i32) {
    let owner = client::ActiveModel {
        first_name: Set("Anna".to_string()),
        last_name: Set("Nowak".to_string()),
        email: Set("owner@example.com".to_string()),
        password_hash: Set("x".to_string()),
        phone_number: Set("+48123456789".to_string()),
        address: Set("ul. Polna 1".to_string()),
        postal_code: Set("00-001 Warszawa".to_string()),
        created_at: Set(0),
        totp_secret: Set(None),
        totp_confirmed: Set(false),
        failed_login_attempts: Set(0),
        locked_until: Set(None),
        must_change_password: Set(false),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed client");

    let vet = doctor::ActiveModel {
        first_name: Set("Jan".to_string()),
        last_name: Set("Kowalski".to_string()),
        email: Set("vet@example.com".to_string()),
        password_hash: Set("x".to_string()),
        specialization: Set("Surgery".to_string()),
        permit_number: Set("1234567".to_string()),
        backup_email: Set(None),
        created_at: Set(0),
        totp_secret: Set(None),
        totp_confirmed: Set(false),
        failed_login_attempts: Set(0),
        locked_until: Set(None),
        must_change_password: Set(false),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed doctor");

    let pet = animal::ActiveModel {
        owner_id: Set(owner.id),
        name: Set("Burek".to_string()),
        species: Set("dog".to_string()),
        breed: Set(None),
        birth_date: Set(None),
        chip_number: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed animal");

    let visit = appointment::ActiveModel {
        owner_id: Set(owner.id),
        doctor_id: Set(vet.id),
        animal_id: Set(pet.id),
        scheduled_at: Set(1_750_000_000),
        reason: Set("checkup".to_string()),
        status: Set("scheduled".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to seed appointment");

    (visit.id, pet.id)
}

/// Pull the base32 secret out of an otpauth:// provisioning URI
pub fn secret_from_uri(uri: &str) -> String {
    uri.split('?')
        .nth(1)
        .and_then(|query| {
            query
                .split('&')
                .find_map(|param| param.strip_prefix("secret="))
        })
        .expect("provisioning URI carries a secret")
        .to_string()
}

/// Generate the code an authenticator app would show right now
pub fn current_code(secret: &str) -> String {
    use totp_rs::{Algorithm, Secret, TOTP};

    let secret_bytes = Secret::Encoded(secret.to_string())
        .to_bytes()
        .expect("secret is valid base32");
    TOTP::new(
        Algorithm::SHA1,
        6,
        1,
        30,
        secret_bytes,
        Some(TEST_ISSUER.to_string()),
        "test".to_string(),
    )
    .expect("TOTP parameters are valid")
    .generate_current()
    .expect("system clock is sane")
}
