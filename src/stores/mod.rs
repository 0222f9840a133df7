// Stores layer - Data access and repository pattern
pub mod account_store;
pub mod animal_store;
pub mod appointment_store;
pub mod facility_store;
pub mod invoice_store;
pub mod medical_record_store;
pub mod weight_log_store;

pub use account_store::AccountStore;
pub use animal_store::AnimalStore;
pub use appointment_store::AppointmentStore;
pub use facility_store::FacilityStore;
pub use invoice_store::InvoiceStore;
pub use medical_record_store::MedicalRecordStore;
pub use weight_log_store::WeightLogStore;
