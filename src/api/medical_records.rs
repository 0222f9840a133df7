use poem_openapi::{param::Path, param::Query, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::errors::clinic::ClinicError;
use crate::services::RecordMirror;
use crate::stores::MedicalRecordStore;
use crate::types::dto::medical_records::{
    DeleteRecordResponse, MedicalRecordCreate, MedicalRecordResponse, MedicalRecordUpdate,
};

/// Medical records API with ledger mirroring.
///
/// Every write commits relationally first, then mirrors the record's digest
/// onto the append-only ledger. A ledger failure degrades the response
/// (`mirror_error` set, no transaction reference) instead of failing it.
pub struct MedicalRecordsApi {
    records: Arc<MedicalRecordStore>,
    mirror: Arc<RecordMirror>,
}

impl MedicalRecordsApi {
    pub fn new(records: Arc<MedicalRecordStore>, mirror: Arc<RecordMirror>) -> Self {
        Self { records, mirror }
    }
}

/// API tags for medical record endpoints
#[derive(Tags)]
enum RecordTags {
    /// Medical record endpoints
    MedicalRecords,
}

#[OpenApi(prefix_path = "/medical-records")]
impl MedicalRecordsApi {
    /// List medical records
    #[oai(path = "/", method = "get", tag = "RecordTags::MedicalRecords")]
    async fn list_records(
        &self,
        skip: Query<Option<u64>>,
        limit: Query<Option<u64>>,
    ) -> Result<Json<Vec<MedicalRecordResponse>>, ClinicError> {
        let records = self
            .records
            .list(skip.0.unwrap_or(0), limit.0.unwrap_or(100))
            .await?;

        Ok(Json(
            records
                .into_iter()
                .map(MedicalRecordResponse::from_model)
                .collect(),
        ))
    }

    /// List medical records for one appointment
    #[oai(
        path = "/appointment/:appointment_id",
        method = "get",
        tag = "RecordTags::MedicalRecords"
    )]
    async fn list_by_appointment(
        &self,
        appointment_id: Path<i32>,
    ) -> Result<Json<Vec<MedicalRecordResponse>>, ClinicError> {
        let records = self.records.list_by_appointment(appointment_id.0).await?;

        Ok(Json(
            records
                .into_iter()
                .map(MedicalRecordResponse::from_model)
                .collect(),
        ))
    }

    /// Fetch one medical record
    #[oai(path = "/:record_id", method = "get", tag = "RecordTags::MedicalRecords")]
    async fn get_record(
        &self,
        record_id: Path<i32>,
    ) -> Result<Json<MedicalRecordResponse>, ClinicError> {
        let record = self.records.get(record_id.0).await?;
        Ok(Json(MedicalRecordResponse::from_model(record)))
    }

    /// Create a medical record and mirror it onto the ledger
    #[oai(path = "/", method = "post", tag = "RecordTags::MedicalRecords")]
    async fn create_record(
        &self,
        body: Json<MedicalRecordCreate>,
    ) -> Result<Json<MedicalRecordResponse>, ClinicError> {
        let record = self.records.create(&body.0).await?;

        let write = self.mirror.record_created(&record).await;
        let stored = self
            .records
            .set_mirror_state(record.id, &write.digest, write.tx.as_deref())
            .await?;

        let mut response = MedicalRecordResponse::from_model(stored);
        response.mirror_error = write.error;
        Ok(Json(response))
    }

    /// Update a medical record and mirror the new digest
    #[oai(path = "/:record_id", method = "put", tag = "RecordTags::MedicalRecords")]
    async fn update_record(
        &self,
        record_id: Path<i32>,
        body: Json<MedicalRecordUpdate>,
    ) -> Result<Json<MedicalRecordResponse>, ClinicError> {
        let record = self.records.update(record_id.0, &body.0).await?;

        let write = self.mirror.record_updated(&record).await;
        let stored = self
            .records
            .set_mirror_state(record.id, &write.digest, write.tx.as_deref())
            .await?;

        let mut response = MedicalRecordResponse::from_model(stored);
        response.mirror_error = write.error;
        Ok(Json(response))
    }

    /// Delete a medical record, tombstoning it on the ledger first
    #[oai(path = "/:record_id", method = "delete", tag = "RecordTags::MedicalRecords")]
    async fn delete_record(
        &self,
        record_id: Path<i32>,
    ) -> Result<Json<DeleteRecordResponse>, ClinicError> {
        // Reject unknown ids before touching the ledger
        self.records.get(record_id.0).await?;

        // Tombstone first; the relational delete proceeds even when the
        // ledger is unreachable
        let (tx_hash, mirror_error) = self.mirror.record_deleted(record_id.0).await;
        self.records.delete(record_id.0).await?;

        Ok(Json(DeleteRecordResponse {
            status: "deleted".to_string(),
            tx_hash,
            mirror_error,
        }))
    }
}
