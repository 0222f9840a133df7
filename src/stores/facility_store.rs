use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, Set};

use crate::errors::clinic::ClinicError;
use crate::types::db::facility;
use crate::types::dto::facilities::FacilityCreate;

fn db_error(e: sea_orm::DbErr) -> ClinicError {
    ClinicError::internal_error(format!("Database error: {}", e))
}

pub struct FacilityStore {
    db: DatabaseConnection,
}

impl FacilityStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, data: &FacilityCreate) -> Result<facility::Model, ClinicError> {
        let new_facility = facility::ActiveModel {
            name: Set(data.name.clone()),
            address: Set(data.address.clone()),
            phone_number: Set(data.phone_number.clone()),
            ..Default::default()
        };

        new_facility.insert(&self.db).await.map_err(db_error)
    }

    pub async fn list(&self) -> Result<Vec<facility::Model>, ClinicError> {
        facility::Entity::find().all(&self.db).await.map_err(db_error)
    }

    pub async fn get(&self, facility_id: i32) -> Result<facility::Model, ClinicError> {
        facility::Entity::find_by_id(facility_id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| ClinicError::not_found("Facility"))
    }

    pub async fn delete(&self, facility_id: i32) -> Result<(), ClinicError> {
        let facility = self.get(facility_id).await?;
        facility.delete(&self.db).await.map_err(db_error)?;
        Ok(())
    }
}
