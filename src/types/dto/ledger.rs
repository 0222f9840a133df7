use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::ledger::LedgerEntry;

/// Ledger-side view of a medical record, for audit display
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LedgerEntryResponse {
    pub record_id: i32,

    /// Content digest recorded on the ledger
    pub digest: String,

    /// Ledger-assigned timestamp (Unix)
    pub timestamp: i64,

    /// True when the record was tombstoned
    pub tombstoned: bool,

    /// Service account that submitted the entry
    pub owner: String,
}

impl From<LedgerEntry> for LedgerEntryResponse {
    fn from(e: LedgerEntry) -> Self {
        Self {
            record_id: e.record_id,
            digest: e.digest,
            timestamp: e.timestamp,
            tombstoned: e.tombstoned,
            owner: e.owner,
        }
    }
}

/// Record ids submitted by one ledger account
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct LedgerOwnerResponse {
    pub owner: String,
    pub record_ids: Vec<i32>,
}
