use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, Set};

use crate::errors::clinic::ClinicError;
use crate::types::db::{animal, appointment, client, doctor};
use crate::types::dto::appointments::{AppointmentCreate, AppointmentUpdate};

fn db_error(e: sea_orm::DbErr) -> ClinicError {
    ClinicError::internal_error(format!("Database error: {}", e))
}

pub struct AppointmentStore {
    db: DatabaseConnection,
}

impl AppointmentStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create an appointment; the client, doctor and animal must all exist
    pub async fn create(
        &self,
        data: &AppointmentCreate,
    ) -> Result<appointment::Model, ClinicError> {
        let owner_exists = client::Entity::find_by_id(data.owner_id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .is_some();
        if !owner_exists {
            return Err(ClinicError::not_found("Owner"));
        }

        let doctor_exists = doctor::Entity::find_by_id(data.doctor_id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .is_some();
        if !doctor_exists {
            return Err(ClinicError::not_found("Doctor"));
        }

        let animal_exists = animal::Entity::find_by_id(data.animal_id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .is_some();
        if !animal_exists {
            return Err(ClinicError::not_found("Animal"));
        }

        let new_appointment = appointment::ActiveModel {
            owner_id: Set(data.owner_id),
            doctor_id: Set(data.doctor_id),
            animal_id: Set(data.animal_id),
            scheduled_at: Set(data.scheduled_at),
            reason: Set(data.reason.clone()),
            status: Set("scheduled".to_string()),
            ..Default::default()
        };

        new_appointment.insert(&self.db).await.map_err(db_error)
    }

    pub async fn list(&self) -> Result<Vec<appointment::Model>, ClinicError> {
        appointment::Entity::find()
            .all(&self.db)
            .await
            .map_err(db_error)
    }

    pub async fn get(&self, appointment_id: i32) -> Result<appointment::Model, ClinicError> {
        appointment::Entity::find_by_id(appointment_id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| ClinicError::not_found("Appointment"))
    }

    pub async fn update(
        &self,
        appointment_id: i32,
        data: &AppointmentUpdate,
    ) -> Result<appointment::Model, ClinicError> {
        let existing = self.get(appointment_id).await?;

        if let Some(doctor_id) = data.doctor_id {
            let doctor_exists = doctor::Entity::find_by_id(doctor_id)
                .one(&self.db)
                .await
                .map_err(db_error)?
                .is_some();
            if !doctor_exists {
                return Err(ClinicError::not_found("Doctor"));
            }
        }

        if let Some(status) = &data.status {
            if !matches!(status.as_str(), "scheduled" | "completed" | "cancelled") {
                return Err(ClinicError::validation_failed(format!(
                    "Unknown appointment status '{}'",
                    status
                )));
            }
        }

        let mut active: appointment::ActiveModel = existing.into();
        if let Some(doctor_id) = data.doctor_id {
            active.doctor_id = Set(doctor_id);
        }
        if let Some(scheduled_at) = data.scheduled_at {
            active.scheduled_at = Set(scheduled_at);
        }
        if let Some(reason) = &data.reason {
            active.reason = Set(reason.clone());
        }
        if let Some(status) = &data.status {
            active.status = Set(status.clone());
        }

        active.update(&self.db).await.map_err(db_error)
    }

    pub async fn delete(&self, appointment_id: i32) -> Result<(), ClinicError> {
        let appointment = self.get(appointment_id).await?;
        appointment.delete(&self.db).await.map_err(db_error)?;
        Ok(())
    }
}
