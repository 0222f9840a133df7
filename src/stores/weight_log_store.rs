use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set};

use crate::errors::clinic::ClinicError;
use crate::types::db::{animal, weight_log};
use crate::types::dto::weight_logs::WeightLogCreate;

fn db_error(e: sea_orm::DbErr) -> ClinicError {
    ClinicError::internal_error(format!("Database error: {}", e))
}

pub struct WeightLogStore {
    db: DatabaseConnection,
}

impl WeightLogStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Record a weight measurement; the animal must exist
    pub async fn create(&self, data: &WeightLogCreate) -> Result<weight_log::Model, ClinicError> {
        let animal_exists = animal::Entity::find_by_id(data.animal_id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .is_some();
        if !animal_exists {
            return Err(ClinicError::not_found("Animal"));
        }

        if data.weight_kg <= 0.0 {
            return Err(ClinicError::validation_failed(
                "Weight must be positive".to_string(),
            ));
        }

        let new_log = weight_log::ActiveModel {
            animal_id: Set(data.animal_id),
            weight_kg: Set(data.weight_kg),
            measured_at: Set(data.measured_at.unwrap_or_else(|| Utc::now().timestamp())),
            ..Default::default()
        };

        new_log.insert(&self.db).await.map_err(db_error)
    }

    /// Weight history of one animal, oldest first
    pub async fn list_by_animal(&self, animal_id: i32) -> Result<Vec<weight_log::Model>, ClinicError> {
        weight_log::Entity::find()
            .filter(weight_log::Column::AnimalId.eq(animal_id))
            .order_by_asc(weight_log::Column::MeasuredAt)
            .all(&self.db)
            .await
            .map_err(db_error)
    }

    pub async fn delete(&self, weight_log_id: i32) -> Result<(), ClinicError> {
        let log = weight_log::Entity::find_by_id(weight_log_id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| ClinicError::not_found("Weight log"))?;

        log.delete(&self.db).await.map_err(db_error)?;
        Ok(())
    }
}
