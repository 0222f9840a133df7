// External append-only ledger for medical-record digests
pub mod http;
pub mod memory;

pub use http::HttpLedgerClient;
pub use memory::{FailingLedger, MemoryLedger};

use async_trait::async_trait;

use crate::errors::ledger::LedgerError;

/// One ledger entry, keyed by the medical record's integer id
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub record_id: i32,
    pub digest: String,
    pub timestamp: i64,
    pub tombstoned: bool,
    pub owner: String,
}

/// Client for the external append-only ledger.
///
/// The ledger is opaque: this trait is the whole contract. Submissions
/// return a transaction reference once the ledger confirms the write;
/// `delete` appends a tombstone rather than removing history.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    async fn add(&self, record_id: i32, digest: &str) -> Result<String, LedgerError>;

    async fn update(&self, record_id: i32, digest: &str) -> Result<String, LedgerError>;

    async fn delete(&self, record_id: i32) -> Result<String, LedgerError>;

    async fn get(&self, record_id: i32) -> Result<LedgerEntry, LedgerError>;

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<i32>, LedgerError>;
}
