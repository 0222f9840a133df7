use std::sync::Arc;

use migration::{Migrator, MigratorTrait};
use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;
use sea_orm::{Database, DatabaseConnection};

use vetclinic_backend::api::{
    AnimalsApi, AppointmentsApi, FacilitiesApi, HealthApi, InvoicesApi, LedgerApi,
    MedicalRecordsApi, UsersApi, WeightLogsApi,
};
use vetclinic_backend::config::{logging::init_logging, AppConfig};
use vetclinic_backend::ledger::{HttpLedgerClient, LedgerClient};
use vetclinic_backend::services::{
    AuthService, PasswordService, RecordMirror, TokenService, TotpService,
};
use vetclinic_backend::stores::{
    AccountStore, AnimalStore, AppointmentStore, FacilityStore, InvoiceStore, MedicalRecordStore,
    WeightLogStore,
};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    if let Err(e) = init_logging() {
        eprintln!("Failed to initialize logging: {}", e);
    }

    let config = AppConfig::from_env().expect("Invalid configuration");

    // Connect to database and run migrations
    let db: DatabaseConnection = Database::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!(database_url = %config.database_url, "Connected to database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    tracing::info!("Database migrations completed");

    // Shared services
    let passwords = Arc::new(PasswordService::new(config.password_pepper.clone()));
    let totp = Arc::new(TotpService::new(config.totp_issuer.clone()));
    let tokens = Arc::new(TokenService::new(config.jwt_secret.clone()));

    // The ledger client is constructed exactly once, here, and injected
    // into everything that mirrors records
    let ledger: Arc<dyn LedgerClient> = Arc::new(HttpLedgerClient::new(
        config.ledger_url.clone(),
        config.ledger_account.clone(),
    ));
    tracing::info!(
        ledger_url = %config.ledger_url,
        ledger_account = %config.ledger_account,
        "Ledger client configured"
    );

    // Stores
    let accounts = Arc::new(AccountStore::new(db.clone(), passwords.clone()));
    let facilities = Arc::new(FacilityStore::new(db.clone()));
    let animals = Arc::new(AnimalStore::new(db.clone()));
    let appointments = Arc::new(AppointmentStore::new(db.clone()));
    let weight_logs = Arc::new(WeightLogStore::new(db.clone()));
    let invoices = Arc::new(InvoiceStore::new(db.clone()));
    let medical_records = Arc::new(MedicalRecordStore::new(db.clone()));

    let auth = Arc::new(AuthService::new(
        accounts.clone(),
        passwords.clone(),
        totp.clone(),
        tokens.clone(),
    ));
    let mirror = Arc::new(RecordMirror::new(ledger.clone()));

    // Create OpenAPI service with all API surfaces
    let api_service = OpenApiService::new(
        (
            HealthApi,
            UsersApi::new(accounts, auth, tokens),
            FacilitiesApi::new(facilities),
            AnimalsApi::new(animals),
            AppointmentsApi::new(appointments),
            MedicalRecordsApi::new(medical_records, mirror),
            WeightLogsApi::new(weight_logs),
            InvoicesApi::new(invoices),
            LedgerApi::new(ledger),
        ),
        "VetClinic API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(format!("http://{}/api", config.bind_addr));

    // Generate Swagger UI from OpenAPI service
    let ui = api_service.swagger_ui();

    // Compose routes: nest API service under /api and Swagger UI under /swagger
    let app = Route::new().nest("/api", api_service).nest("/swagger", ui);

    tracing::info!(bind_addr = %config.bind_addr, "Starting server");
    Server::new(TcpListener::bind(config.bind_addr.clone()))
        .run(app)
        .await
}
