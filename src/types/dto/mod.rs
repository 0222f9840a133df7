// Request/response models for the HTTP surface
pub mod animals;
pub mod appointments;
pub mod auth;
pub mod common;
pub mod facilities;
pub mod invoices;
pub mod ledger;
pub mod medical_records;
pub mod users;
pub mod weight_logs;
