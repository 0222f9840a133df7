use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, QuerySelect, Set};

use crate::errors::clinic::ClinicError;
use crate::types::db::{animal, appointment, medical_record};
use crate::types::dto::medical_records::{MedicalRecordCreate, MedicalRecordUpdate};

fn db_error(e: sea_orm::DbErr) -> ClinicError {
    ClinicError::internal_error(format!("Database error: {}", e))
}

/// Relational store for medical records.
///
/// Referenced entities are validated before any write; the ledger mirror
/// runs after the relational commit and writes its result back through
/// `set_mirror_state`.
pub struct MedicalRecordStore {
    db: DatabaseConnection,
}

impl MedicalRecordStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn require_appointment(&self, appointment_id: i32) -> Result<(), ClinicError> {
        let exists = appointment::Entity::find_by_id(appointment_id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .is_some();
        if exists {
            Ok(())
        } else {
            Err(ClinicError::not_found("Appointment"))
        }
    }

    async fn require_animal(&self, animal_id: i32) -> Result<(), ClinicError> {
        let exists = animal::Entity::find_by_id(animal_id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .is_some();
        if exists {
            Ok(())
        } else {
            Err(ClinicError::not_found("Animal"))
        }
    }

    pub async fn list(&self, skip: u64, limit: u64) -> Result<Vec<medical_record::Model>, ClinicError> {
        medical_record::Entity::find()
            .offset(skip)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(db_error)
    }

    pub async fn list_by_appointment(
        &self,
        appointment_id: i32,
    ) -> Result<Vec<medical_record::Model>, ClinicError> {
        medical_record::Entity::find()
            .filter(medical_record::Column::AppointmentId.eq(appointment_id))
            .all(&self.db)
            .await
            .map_err(db_error)
    }

    pub async fn get(&self, record_id: i32) -> Result<medical_record::Model, ClinicError> {
        medical_record::Entity::find_by_id(record_id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| ClinicError::not_found("Medical record"))
    }

    /// Insert a record after validating the referenced appointment and
    /// animal. Mirror columns start empty; the mirror fills them in.
    pub async fn create(
        &self,
        data: &MedicalRecordCreate,
    ) -> Result<medical_record::Model, ClinicError> {
        self.require_appointment(data.appointment_id).await?;
        self.require_animal(data.animal_id).await?;

        let new_record = medical_record::ActiveModel {
            appointment_id: Set(data.appointment_id),
            animal_id: Set(data.animal_id),
            description: Set(data.description.clone()),
            diagnosis: Set(data.diagnosis.clone()),
            treatment: Set(data.treatment.clone()),
            notes: Set(data.notes.clone()),
            visit_date: Set(data.visit_date.clone()),
            created_at: Set(Utc::now().timestamp()),
            data_hash: Set(None),
            blockchain_tx: Set(None),
            ..Default::default()
        };

        new_record.insert(&self.db).await.map_err(db_error)
    }

    /// Apply a partial update; changed references are validated first
    pub async fn update(
        &self,
        record_id: i32,
        data: &MedicalRecordUpdate,
    ) -> Result<medical_record::Model, ClinicError> {
        let existing = self.get(record_id).await?;

        if let Some(appointment_id) = data.appointment_id {
            self.require_appointment(appointment_id).await?;
        }
        if let Some(animal_id) = data.animal_id {
            self.require_animal(animal_id).await?;
        }

        let mut active: medical_record::ActiveModel = existing.into();
        if let Some(appointment_id) = data.appointment_id {
            active.appointment_id = Set(appointment_id);
        }
        if let Some(animal_id) = data.animal_id {
            active.animal_id = Set(animal_id);
        }
        if let Some(description) = &data.description {
            active.description = Set(description.clone());
        }
        if data.diagnosis.is_some() {
            active.diagnosis = Set(data.diagnosis.clone());
        }
        if data.treatment.is_some() {
            active.treatment = Set(data.treatment.clone());
        }
        if data.notes.is_some() {
            active.notes = Set(data.notes.clone());
        }
        if let Some(visit_date) = &data.visit_date {
            active.visit_date = Set(visit_date.clone());
        }

        active.update(&self.db).await.map_err(db_error)
    }

    /// Persist the outcome of a mirror write. The digest always reflects
    /// the committed row; the transaction reference is absent when the
    /// ledger write failed.
    pub async fn set_mirror_state(
        &self,
        record_id: i32,
        data_hash: &str,
        blockchain_tx: Option<&str>,
    ) -> Result<medical_record::Model, ClinicError> {
        let existing = self.get(record_id).await?;

        let mut active: medical_record::ActiveModel = existing.into();
        active.data_hash = Set(Some(data_hash.to_string()));
        active.blockchain_tx = Set(blockchain_tx.map(str::to_string));
        active.update(&self.db).await.map_err(db_error)
    }

    pub async fn delete(&self, record_id: i32) -> Result<(), ClinicError> {
        let record = self.get(record_id).await?;
        record.delete(&self.db).await.map_err(db_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::Database;

    async fn setup() -> (DatabaseConnection, MedicalRecordStore) {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to create test database");

        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        (db.clone(), MedicalRecordStore::new(db))
    }

    async fn seed_appointment(db: &DatabaseConnection) -> (i32, i32) {
        use crate::types::db::{client, doctor};

        let owner = client::ActiveModel {
            first_name: Set("Anna".to_string()),
            last_name: Set("Nowak".to_string()),
            email: Set("owner@example.com".to_string()),
            password_hash: Set("x".to_string()),
            phone_number: Set("+48123456789".to_string()),
            address: Set("ul. Polna 1".to_string()),
            postal_code: Set("00-001 Warszawa".to_string()),
            created_at: Set(0),
            totp_secret: Set(None),
            totp_confirmed: Set(false),
            failed_login_attempts: Set(0),
            locked_until: Set(None),
            must_change_password: Set(false),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();

        let vet = doctor::ActiveModel {
            first_name: Set("Jan".to_string()),
            last_name: Set("Kowalski".to_string()),
            email: Set("vet@example.com".to_string()),
            password_hash: Set("x".to_string()),
            specialization: Set("Surgery".to_string()),
            permit_number: Set("1234567".to_string()),
            backup_email: Set(None),
            created_at: Set(0),
            totp_secret: Set(None),
            totp_confirmed: Set(false),
            failed_login_attempts: Set(0),
            locked_until: Set(None),
            must_change_password: Set(false),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();

        let pet = animal::ActiveModel {
            owner_id: Set(owner.id),
            name: Set("Burek".to_string()),
            species: Set("dog".to_string()),
            breed: Set(None),
            birth_date: Set(None),
            chip_number: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();

        let visit = appointment::ActiveModel {
            owner_id: Set(owner.id),
            doctor_id: Set(vet.id),
            animal_id: Set(pet.id),
            scheduled_at: Set(1_750_000_000),
            reason: Set("checkup".to_string()),
            status: Set("scheduled".to_string()),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();

        (visit.id, pet.id)
    }

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
    async fn test_create_rejects_missing_appointment() {
        let (_db, store) = setup().await;

        let result = store.create(&record_data(1, 1)).await;
        assert!(matches!(result, Err(ClinicError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_create_and_get_roundtrip() {
        let (db, store) = setup().await;
        let (appointment_id, animal_id) = seed_appointment(&db).await;

        let created = store
            .create(&record_data(appointment_id, animal_id))
            .await
            .unwrap();
        assert!(created.data_hash.is_none());
        assert!(created.blockchain_tx.is_none());

        let fetched = store.get(created.id).await.unwrap();
        assert_eq!(fetched.description, "Annual checkup");
    }

    #[tokio::test]
    async fn test_set_mirror_state_persists_hash_and_tx() {
        let (db, store) = setup().await;
        let (appointment_id, animal_id) = seed_appointment(&db).await;

        let created = store
            .create(&record_data(appointment_id, animal_id))
            .await
            .unwrap();

        let updated = store
            .set_mirror_state(created.id, "digest-abc", Some("0xfeed"))
            .await
            .unwrap();
        assert_eq!(updated.data_hash.as_deref(), Some("digest-abc"));
        assert_eq!(updated.blockchain_tx.as_deref(), Some("0xfeed"));

        // Mirror failure leaves the digest but no transaction reference
        let degraded = store
            .set_mirror_state(created.id, "digest-def", None)
            .await
            .unwrap();
        assert_eq!(degraded.data_hash.as_deref(), Some("digest-def"));
        assert!(degraded.blockchain_tx.is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let (db, store) = setup().await;
        let (appointment_id, animal_id) = seed_appointment(&db).await;

        let created = store
            .create(&record_data(appointment_id, animal_id))
            .await
            .unwrap();
        store.delete(created.id).await.unwrap();

        let result = store.get(created.id).await;
        assert!(matches!(result, Err(ClinicError::NotFound(_))));
    }
}
