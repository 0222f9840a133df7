use poem_openapi::{param::Path, param::Query, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::errors::clinic::ClinicError;
use crate::errors::ledger::LedgerError;
use crate::ledger::LedgerClient;
use crate::types::dto::ledger::{LedgerEntryResponse, LedgerOwnerResponse};

fn map_ledger_error(e: LedgerError) -> ClinicError {
    match e {
        LedgerError::NotFound(_) => ClinicError::not_found("Ledger entry"),
        other => ClinicError::internal_error(other.to_string()),
    }
}

/// Read-only audit view of the medical-record ledger.
///
/// Not the primary read path; the relational store stays authoritative for
/// record content.
pub struct LedgerApi {
    ledger: Arc<dyn LedgerClient>,
}

impl LedgerApi {
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        Self { ledger }
    }
}

/// API tags for ledger audit endpoints
#[derive(Tags)]
enum LedgerTags {
    /// Ledger audit endpoints
    Ledger,
}

#[OpenApi(prefix_path = "/ledger")]
impl LedgerApi {
    /// Fetch the ledger entry for one medical record
    #[oai(path = "/records/:record_id", method = "get", tag = "LedgerTags::Ledger")]
    async fn get_entry(
        &self,
        record_id: Path<i32>,
    ) -> Result<Json<LedgerEntryResponse>, ClinicError> {
        let entry = self
            .ledger
            .get(record_id.0)
            .await
            .map_err(map_ledger_error)?;

        Ok(Json(entry.into()))
    }

    /// List record ids submitted by one ledger account
    #[oai(path = "/records", method = "get", tag = "LedgerTags::Ledger")]
    async fn list_by_owner(
        &self,
        owner: Query<String>,
    ) -> Result<Json<LedgerOwnerResponse>, ClinicError> {
        let record_ids = self
            .ledger
            .list_by_owner(&owner.0)
            .await
            .map_err(map_ledger_error)?;

        Ok(Json(LedgerOwnerResponse {
            owner: owner.0,
            record_ids,
        }))
    }
}
