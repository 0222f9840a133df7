// Database entity definitions
pub mod animal;
pub mod appointment;
pub mod client;
pub mod consultant;
pub mod doctor;
pub mod facility;
pub mod invoice;
pub mod medical_record;
pub mod weight_log;
