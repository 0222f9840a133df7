use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::medical_record;

/// Request model for creating a medical record
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MedicalRecordCreate {
    pub appointment_id: i32,
    pub animal_id: i32,
    pub description: String,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub notes: Option<String>,

    /// Visit date (ISO 8601 date)
    pub visit_date: String,
}

/// Request model for updating a medical record
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MedicalRecordUpdate {
    pub appointment_id: Option<i32>,
    pub animal_id: Option<i32>,
    pub description: Option<String>,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub notes: Option<String>,
    pub visit_date: Option<String>,
}

/// Response model for a medical record, including its ledger mirror state.
///
/// `blockchain_tx` is absent and `mirror_error` present when the relational
/// write succeeded but the ledger write did not ("stored but not yet
/// notarized").
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct MedicalRecordResponse {
    pub id: i32,
    pub appointment_id: i32,
    pub animal_id: i32,
    pub description: String,
    pub diagnosis: Option<String>,
    pub treatment: Option<String>,
    pub notes: Option<String>,
    pub visit_date: String,
    pub created_at: i64,

    /// Content digest submitted to the ledger
    pub data_hash: Option<String>,

    /// Ledger transaction reference of the last successful mirror write
    pub blockchain_tx: Option<String>,

    /// Present when the last mirror write failed
    pub mirror_error: Option<String>,
}

impl MedicalRecordResponse {
    /// Build a response from a relational row; mirror fields come from the
    /// row itself (last persisted mirror state).
    pub fn from_model(m: medical_record::Model) -> Self {
        Self {
            id: m.id,
            appointment_id: m.appointment_id,
            animal_id: m.animal_id,
            description: m.description,
            diagnosis: m.diagnosis,
            treatment: m.treatment,
            notes: m.notes,
            visit_date: m.visit_date,
            created_at: m.created_at,
            data_hash: m.data_hash,
            blockchain_tx: m.blockchain_tx,
            mirror_error: None,
        }
    }
}

/// Response model for medical-record deletion
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct DeleteRecordResponse {
    /// Always "deleted"
    pub status: String,

    /// Ledger transaction reference of the tombstone write
    pub tx_hash: Option<String>,

    /// Present when the tombstone write failed
    pub mirror_error: Option<String>,
}
