use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use super::{LedgerClient, LedgerEntry};
use crate::errors::ledger::LedgerError;

/// In-process ledger used by tests and local development.
///
/// Same contract as the real service: entries keyed by record id, deletes
/// tombstone instead of removing, every submission yields a transaction
/// reference.
pub struct MemoryLedger {
    owner: String,
    entries: Mutex<HashMap<i32, LedgerEntry>>,
    sequence: AtomicU64,
}

impl MemoryLedger {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            entries: Mutex::new(HashMap::new()),
            sequence: AtomicU64::new(1),
        }
    }

    fn next_tx(&self) -> String {
        format!("memtx-{:04}", self.sequence.fetch_add(1, Ordering::SeqCst))
    }

    /// Snapshot of one entry, for assertions in tests
    pub fn entry(&self, record_id: i32) -> Option<LedgerEntry> {
        self.entries
            .lock()
            .expect("ledger state poisoned")
            .get(&record_id)
            .cloned()
    }
}

#[async_trait]
impl LedgerClient for MemoryLedger {
    async fn add(&self, record_id: i32, digest: &str) -> Result<String, LedgerError> {
        let mut entries = self.entries.lock().expect("ledger state poisoned");
        entries.insert(
            record_id,
            LedgerEntry {
                record_id,
                digest: digest.to_string(),
                timestamp: Utc::now().timestamp(),
                tombstoned: false,
                owner: self.owner.clone(),
            },
        );
        Ok(self.next_tx())
    }

    async fn update(&self, record_id: i32, digest: &str) -> Result<String, LedgerError> {
        let mut entries = self.entries.lock().expect("ledger state poisoned");
        let entry = entries
            .get_mut(&record_id)
            .ok_or(LedgerError::NotFound(record_id))?;

        entry.digest = digest.to_string();
        entry.timestamp = Utc::now().timestamp();
        Ok(self.next_tx())
    }

    async fn delete(&self, record_id: i32) -> Result<String, LedgerError> {
        let mut entries = self.entries.lock().expect("ledger state poisoned");
        let entry = entries
            .get_mut(&record_id)
            .ok_or(LedgerError::NotFound(record_id))?;

        entry.tombstoned = true;
        entry.timestamp = Utc::now().timestamp();
        Ok(self.next_tx())
    }

    async fn get(&self, record_id: i32) -> Result<LedgerEntry, LedgerError> {
        self.entries
            .lock()
            .expect("ledger state poisoned")
            .get(&record_id)
            .cloned()
            .ok_or(LedgerError::NotFound(record_id))
    }

    async fn list_by_owner(&self, owner: &str) -> Result<Vec<i32>, LedgerError> {
        let entries = self.entries.lock().expect("ledger state poisoned");
        let mut record_ids: Vec<i32> = entries
            .values()
            .filter(|e| e.owner == owner)
            .map(|e| e.record_id)
            .collect();
        record_ids.sort_unstable();
        Ok(record_ids)
    }
}

/// Ledger double that refuses every call; exercises the degraded-success
/// path where the relational write lands but the mirror write does not.
pub struct FailingLedger;

#[async_trait]
impl LedgerClient for FailingLedger {
    async fn add(&self, _record_id: i32, _digest: &str) -> Result<String, LedgerError> {
        Err(LedgerError::Transport("connection refused".to_string()))
    }

    async fn update(&self, _record_id: i32, _digest: &str) -> Result<String, LedgerError> {
        Err(LedgerError::Transport("connection refused".to_string()))
    }

    async fn delete(&self, _record_id: i32) -> Result<String, LedgerError> {
        Err(LedgerError::Transport("connection refused".to_string()))
    }

    async fn get(&self, _record_id: i32) -> Result<LedgerEntry, LedgerError> {
        Err(LedgerError::Transport("connection refused".to_string()))
    }

    async fn list_by_owner(&self, _owner: &str) -> Result<Vec<i32>, LedgerError> {
        Err(LedgerError::Transport("connection refused".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_add_then_get() {
        let ledger = MemoryLedger::new("svc");

        let tx = ledger.add(1, "digest-one").await.unwrap();
        assert!(tx.starts_with("memtx-"));

        let entry = ledger.get(1).await.unwrap();
        assert_eq!(entry.digest, "digest-one");
        assert_eq!(entry.owner, "svc");
        assert!(!entry.tombstoned);
    }

    #[tokio::test]
    async fn test_update_replaces_digest() {
        let ledger = MemoryLedger::new("svc");

        ledger.add(1, "digest-one").await.unwrap();
        let tx1 = ledger.update(1, "digest-two").await.unwrap();
        let tx2 = ledger.update(1, "digest-three").await.unwrap();

        assert_ne!(tx1, tx2);
        assert_eq!(ledger.get(1).await.unwrap().digest, "digest-three");
    }

    #[tokio::test]
    async fn test_delete_tombstones() {
        let ledger = MemoryLedger::new("svc");

        ledger.add(1, "digest-one").await.unwrap();
        ledger.delete(1).await.unwrap();

        let entry = ledger.get(1).await.unwrap();
        assert!(entry.tombstoned);
        // History is preserved, not removed
        assert_eq!(entry.digest, "digest-one");
    }

    #[tokio::test]
    async fn test_update_missing_record_fails() {
        let ledger = MemoryLedger::new("svc");

        let result = ledger.update(99, "digest").await;
        assert!(matches!(result, Err(LedgerError::NotFound(99))));
    }

    #[tokio::test]
    async fn test_list_by_owner_includes_tombstoned() {
        let ledger = MemoryLedger::new("svc");

        ledger.add(2, "a").await.unwrap();
        ledger.add(1, "b").await.unwrap();
        ledger.delete(2).await.unwrap();

        assert_eq!(ledger.list_by_owner("svc").await.unwrap(), vec![1, 2]);
        assert!(ledger.list_by_owner("other").await.unwrap().is_empty());
    }
}
