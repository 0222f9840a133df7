use serde::Serialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::ledger::LedgerClient;
use crate::types::db::medical_record;

/// Result of one mirror write. Exactly one of `tx` / `error` is set; a
/// failed mirror write never invalidates the relational row.
#[derive(Debug)]
pub struct MirrorWrite {
    pub digest: String,
    pub tx: Option<String>,
    pub error: Option<String>,
}

/// Canonical field set of a medical record. Field order is fixed
/// (alphabetical) so the serialized form, and therefore the digest, is
/// deterministic.
#[derive(Serialize)]
struct CanonicalRecord<'a> {
    animal_id: i32,
    appointment_id: i32,
    created_at: i64,
    description: &'a str,
    diagnosis: Option<&'a str>,
    id: i32,
    notes: Option<&'a str>,
    treatment: Option<&'a str>,
    visit_date: &'a str,
}

/// Mirrors relational medical-record writes onto the external ledger.
///
/// The relational row is always committed before the ledger is touched, so
/// every submitted digest reflects durably stored state. Ledger failures
/// are logged with record id and digest and surfaced to the caller; they do
/// not block or roll back the relational write.
pub struct RecordMirror {
    ledger: Arc<dyn LedgerClient>,
}

impl RecordMirror {
    pub fn new(ledger: Arc<dyn LedgerClient>) -> Self {
        Self { ledger }
    }

    /// Deterministic SHA-256 digest over the record's canonical field set
    pub fn digest(record: &medical_record::Model) -> String {
        let canonical = CanonicalRecord {
            animal_id: record.animal_id,
            appointment_id: record.appointment_id,
            created_at: record.created_at,
            description: &record.description,
            diagnosis: record.diagnosis.as_deref(),
            id: record.id,
            notes: record.notes.as_deref(),
            treatment: record.treatment.as_deref(),
            visit_date: &record.visit_date,
        };

        let json = serde_json::to_string(&canonical)
            .expect("canonical record serialization cannot fail");
        format!("{:x}", Sha256::digest(json.as_bytes()))
    }

    /// Mirror a freshly committed record onto the ledger
    pub async fn record_created(&self, record: &medical_record::Model) -> MirrorWrite {
        let digest = Self::digest(record);
        match self.ledger.add(record.id, &digest).await {
            Ok(tx) => MirrorWrite {
                digest,
                tx: Some(tx),
                error: None,
            },
            Err(e) => {
                tracing::error!(
                    record_id = record.id,
                    digest = %digest,
                    error = %e,
                    "ledger add failed; record stored but not notarized"
                );
                MirrorWrite {
                    digest,
                    tx: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Mirror an updated record's new digest onto the ledger
    pub async fn record_updated(&self, record: &medical_record::Model) -> MirrorWrite {
        let digest = Self::digest(record);
        match self.ledger.update(record.id, &digest).await {
            Ok(tx) => MirrorWrite {
                digest,
                tx: Some(tx),
                error: None,
            },
            Err(e) => {
                tracing::error!(
                    record_id = record.id,
                    digest = %digest,
                    error = %e,
                    "ledger update failed; record stored but not notarized"
                );
                MirrorWrite {
                    digest,
                    tx: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Submit the tombstone for a record about to be deleted.
    /// Returns (tx, error); the relational delete proceeds either way.
    pub async fn record_deleted(&self, record_id: i32) -> (Option<String>, Option<String>) {
        match self.ledger.delete(record_id).await {
            Ok(tx) => (Some(tx), None),
            Err(e) => {
                tracing::error!(
                    record_id,
                    error = %e,
                    "ledger delete failed; tombstone missing for removed record"
                );
                (None, Some(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> medical_record::Model {
        medical_record::Model {
            id: 7,
            appointment_id: 3,
            animal_id: 5,
            description: "Annual checkup".to_string(),
            diagnosis: Some("Healthy".to_string()),
            treatment: None,
            notes: None,
            visit_date: "2025-06-01".to_string(),
            created_at: 1_748_800_000,
            data_hash: None,
            blockchain_tx: None,
        }
    }

    #[test]
    fn test_digest_is_deterministic() {
        assert_eq!(RecordMirror::digest(&record()), RecordMirror::digest(&record()));
    }

    #[test]
    fn test_digest_changes_with_any_field() {
        let base = RecordMirror::digest(&record());

        let mut changed = record();
        changed.description = "Annual checkup and vaccination".to_string();
        assert_ne!(RecordMirror::digest(&changed), base);

        let mut changed = record();
        changed.diagnosis = None;
        assert_ne!(RecordMirror::digest(&changed), base);

        let mut changed = record();
        changed.created_at += 1;
        assert_ne!(RecordMirror::digest(&changed), base);

        let mut changed = record();
        changed.id += 1;
        assert_ne!(RecordMirror::digest(&changed), base);
    }

    #[test]
    fn test_digest_ignores_mirror_columns() {
        // The mirror state is derived from the digest, not part of it
        let mut mirrored = record();
        mirrored.data_hash = Some("abc".to_string());
        mirrored.blockchain_tx = Some("0xdeadbeef".to_string());

        assert_eq!(RecordMirror::digest(&mirrored), RecordMirror::digest(&record()));
    }

    #[test]
    fn test_digest_is_hex_sha256() {
        let digest = RecordMirror::digest(&record());
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
