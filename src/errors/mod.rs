pub mod auth;
pub mod clinic;
pub mod ledger;

pub use auth::AuthError;
pub use clinic::ClinicError;
pub use ledger::LedgerError;
