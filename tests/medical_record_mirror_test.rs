// Medical-record writes mirrored onto the append-only ledger

mod common;

use common::{seed_clinic, setup_test_db};
use std::sync::Arc;

use vetclinic_backend::errors::clinic::ClinicError;
use vetclinic_backend::ledger::{FailingLedger, LedgerClient, MemoryLedger};
use vetclinic_backend::services::RecordMirror;
use vetclinic_backend::stores::MedicalRecordStore;
use vetclinic_backend::types::dto::medical_records::{MedicalRecordCreate, MedicalRecordUpdate};

const SERVICE_ACCOUNT: &str = "vetclinic-service";

fn record_data(appointment_id: i32, animal_id: i32) -> MedicalRecordCreate {
    MedicalRecordCreate {
        appointment_id,
        animal_id,
        description: "Annual checkup".to_string(),
        diagnosis: Some("Healthy".to_string()),
        treatment: None,
        notes: None,
        visit_date: "2025-06-01".to_string(),
    }
}

#[tokio::test]
async fn test_create_mirrors_digest_onto_ledger() {
    let db = setup_test_db().await;
    let (appointment_id, animal_id) = seed_clinic(&db).await;

    let ledger = Arc::new(MemoryLedger::new(SERVICE_ACCOUNT));
    let mirror = RecordMirror::new(ledger.clone());
    let store = MedicalRecordStore::new(db);

    let record = store.create(&record_data(appointment_id, animal_id)).await.unwrap();

    let write = mirror.record_created(&record).await;
    let stored = store
        .set_mirror_state(record.id, &write.digest, write.tx.as_deref())
        .await
        .unwrap();

    assert!(write.error.is_none());
    assert_eq!(stored.data_hash.as_deref(), Some(write.digest.as_str()));
    assert_eq!(stored.blockchain_tx.as_deref(), write.tx.as_deref());

    // The ledger shadow agrees with the relational row
    let entry = ledger.get(record.id).await.unwrap();
    assert_eq!(entry.digest, RecordMirror::digest(&record));
    assert_eq!(entry.owner, SERVICE_ACCOUNT);
    assert!(!entry.tombstoned);
}

#[tokio::test]
async fn test_update_submits_new_digest() {
    let db = setup_test_db().await;
    let (appointment_id, animal_id) = seed_clinic(&db).await;

    let ledger = Arc::new(MemoryLedger::new(SERVICE_ACCOUNT));
    let mirror = RecordMirror::new(ledger.clone());
    let store = MedicalRecordStore::new(db);

    let record = store.create(&record_data(appointment_id, animal_id)).await.unwrap();
    let created_write = mirror.record_created(&record).await;
    store
        .set_mirror_state(record.id, &created_write.digest, created_write.tx.as_deref())
        .await
        .unwrap();

    let updated = store
        .update(
            record.id,
            &MedicalRecordUpdate {
                appointment_id: None,
                animal_id: None,
                description: Some("Annual checkup and vaccination".to_string()),
                diagnosis: None,
                treatment: None,
                notes: None,
                visit_date: None,
            },
        )
        .await
        .unwrap();

    let updated_write = mirror.record_updated(&updated).await;
    store
        .set_mirror_state(updated.id, &updated_write.digest, updated_write.tx.as_deref())
        .await
        .unwrap();

    assert_ne!(created_write.digest, updated_write.digest);
    assert_ne!(created_write.tx, updated_write.tx);
    assert_eq!(ledger.get(record.id).await.unwrap().digest, updated_write.digest);
}

#[tokio::test]
async fn test_delete_tombstones_then_removes_row() {
    let db = setup_test_db().await;
    let (appointment_id, animal_id) = seed_clinic(&db).await;

    let ledger = Arc::new(MemoryLedger::new(SERVICE_ACCOUNT));
    let mirror = RecordMirror::new(ledger.clone());
    let store = MedicalRecordStore::new(db);

    let record = store.create(&record_data(appointment_id, animal_id)).await.unwrap();
    let write = mirror.record_created(&record).await;
    store
        .set_mirror_state(record.id, &write.digest, write.tx.as_deref())
        .await
        .unwrap();

    let (tx_hash, mirror_error) = mirror.record_deleted(record.id).await;
    store.delete(record.id).await.unwrap();

    assert!(tx_hash.is_some());
    assert!(mirror_error.is_none());

    // The relational row is gone; the ledger keeps the tombstoned history
    assert!(matches!(store.get(record.id).await, Err(ClinicError::NotFound(_))));
    let entry = ledger.get(record.id).await.unwrap();
    assert!(entry.tombstoned);
}

#[tokio::test]
async fn test_ledger_failure_degrades_but_keeps_relational_write() {
    let db = setup_test_db().await;
    let (appointment_id, animal_id) = seed_clinic(&db).await;

    let mirror = RecordMirror::new(Arc::new(FailingLedger));
    let store = MedicalRecordStore::new(db);

    let record = store.create(&record_data(appointment_id, animal_id)).await.unwrap();
    let write = mirror.record_created(&record).await;
    let stored = store
        .set_mirror_state(record.id, &write.digest, write.tx.as_deref())
        .await
        .unwrap();

    // Degraded success: the failure is reported, not swallowed
    assert!(write.tx.is_none());
    let error = write.error.expect("mirror failure is surfaced");
    assert!(error.contains("connection refused"));

    // The relational row survives with the digest recorded for later
    // reconciliation, but no transaction reference
    let fetched = store.get(record.id).await.unwrap();
    assert_eq!(fetched.data_hash.as_deref(), Some(write.digest.as_str()));
    assert!(fetched.blockchain_tx.is_none());
    assert_eq!(stored.data_hash, fetched.data_hash);
}

#[tokio::test]
async fn test_ledger_failure_on_delete_still_removes_row() {
    let db = setup_test_db().await;
    let (appointment_id, animal_id) = seed_clinic(&db).await;

    let failing_mirror = RecordMirror::new(Arc::new(FailingLedger));
    let store = MedicalRecordStore::new(db);

    let record = store.create(&record_data(appointment_id, animal_id)).await.unwrap();

    let (tx_hash, mirror_error) = failing_mirror.record_deleted(record.id).await;
    store.delete(record.id).await.unwrap();

    assert!(tx_hash.is_none());
    assert!(mirror_error.is_some());
    assert!(matches!(store.get(record.id).await, Err(ClinicError::NotFound(_))));
}

#[tokio::test]
async fn test_missing_references_rejected_before_any_write() {
    let db = setup_test_db().await;
    let (appointment_id, _animal_id) = seed_clinic(&db).await;

    let ledger = Arc::new(MemoryLedger::new(SERVICE_ACCOUNT));
    let store = MedicalRecordStore::new(db);

    // Nonexistent animal: rejected before relational or ledger writes
    let result = store.create(&record_data(appointment_id, 999)).await;
    assert!(matches!(result, Err(ClinicError::NotFound(_))));
    assert!(ledger.list_by_owner(SERVICE_ACCOUNT).await.unwrap().is_empty());
}
