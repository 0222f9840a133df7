// API layer - HTTP endpoints
pub mod animals;
pub mod appointments;
pub mod facilities;
pub mod health;
pub mod invoices;
pub mod ledger;
pub mod medical_records;
pub mod users;
pub mod weight_logs;

pub use animals::AnimalsApi;
pub use appointments::AppointmentsApi;
pub use facilities::FacilitiesApi;
pub use health::HealthApi;
pub use invoices::InvoicesApi;
pub use ledger::LedgerApi;
pub use medical_records::MedicalRecordsApi;
pub use users::UsersApi;
pub use weight_logs::WeightLogsApi;
