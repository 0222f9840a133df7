use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set};

use crate::errors::clinic::ClinicError;
use crate::types::db::{animal, client};
use crate::types::dto::animals::{AnimalCreate, AnimalUpdate};

fn db_error(e: sea_orm::DbErr) -> ClinicError {
    ClinicError::internal_error(format!("Database error: {}", e))
}

pub struct AnimalStore {
    db: DatabaseConnection,
}

impl AnimalStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create an animal; the owning client must exist
    pub async fn create(&self, data: &AnimalCreate) -> Result<animal::Model, ClinicError> {
        let owner_exists = client::Entity::find_by_id(data.owner_id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .is_some();
        if !owner_exists {
            return Err(ClinicError::not_found("Owner"));
        }

        let new_animal = animal::ActiveModel {
            owner_id: Set(data.owner_id),
            name: Set(data.name.clone()),
            species: Set(data.species.clone()),
            breed: Set(data.breed.clone()),
            birth_date: Set(data.birth_date.clone()),
            chip_number: Set(data.chip_number.clone()),
            ..Default::default()
        };

        new_animal.insert(&self.db).await.map_err(db_error)
    }

    pub async fn list(&self) -> Result<Vec<animal::Model>, ClinicError> {
        animal::Entity::find().all(&self.db).await.map_err(db_error)
    }

    pub async fn list_by_owner(&self, owner_id: i32) -> Result<Vec<animal::Model>, ClinicError> {
        animal::Entity::find()
            .filter(animal::Column::OwnerId.eq(owner_id))
            .all(&self.db)
            .await
            .map_err(db_error)
    }

    pub async fn get(&self, animal_id: i32) -> Result<animal::Model, ClinicError> {
        animal::Entity::find_by_id(animal_id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| ClinicError::not_found("Animal"))
    }

    pub async fn update(
        &self,
        animal_id: i32,
        data: &AnimalUpdate,
    ) -> Result<animal::Model, ClinicError> {
        let existing = self.get(animal_id).await?;

        let mut active: animal::ActiveModel = existing.into();
        if let Some(name) = &data.name {
            active.name = Set(name.clone());
        }
        if let Some(species) = &data.species {
            active.species = Set(species.clone());
        }
        if data.breed.is_some() {
            active.breed = Set(data.breed.clone());
        }
        if data.birth_date.is_some() {
            active.birth_date = Set(data.birth_date.clone());
        }
        if data.chip_number.is_some() {
            active.chip_number = Set(data.chip_number.clone());
        }

        active.update(&self.db).await.map_err(db_error)
    }

    pub async fn delete(&self, animal_id: i32) -> Result<(), ClinicError> {
        let animal = self.get(animal_id).await?;
        animal.delete(&self.db).await.map_err(db_error)?;
        Ok(())
    }
}
