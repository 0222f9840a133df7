use poem_openapi::{param::Path, param::Query, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::errors::clinic::ClinicError;
use crate::services::validation;
use crate::stores::AnimalStore;
use crate::types::dto::animals::{AnimalCreate, AnimalOut, AnimalUpdate};

/// Animals API
pub struct AnimalsApi {
    animals: Arc<AnimalStore>,
}

impl AnimalsApi {
    pub fn new(animals: Arc<AnimalStore>) -> Self {
        Self { animals }
    }
}

/// API tags for animal endpoints
#[derive(Tags)]
enum AnimalTags {
    /// Animal management endpoints
    Animals,
}

#[OpenApi(prefix_path = "/animals")]
impl AnimalsApi {
    /// Register an animal for an existing client
    #[oai(path = "/", method = "post", tag = "AnimalTags::Animals")]
    async fn create_animal(&self, body: Json<AnimalCreate>) -> Result<Json<AnimalOut>, ClinicError> {
        if let Some(chip_number) = &body.chip_number {
            validation::validate_chip_number(chip_number)
                .map_err(ClinicError::validation_failed)?;
        }

        let created = self.animals.create(&body.0).await?;
        Ok(Json(created.into()))
    }

    /// List animals, optionally filtered by owner
    #[oai(path = "/", method = "get", tag = "AnimalTags::Animals")]
    async fn list_animals(
        &self,
        owner_id: Query<Option<i32>>,
    ) -> Result<Json<Vec<AnimalOut>>, ClinicError> {
        let animals = match owner_id.0 {
            Some(owner_id) => self.animals.list_by_owner(owner_id).await?,
            None => self.animals.list().await?,
        };

        Ok(Json(animals.into_iter().map(Into::into).collect()))
    }

    /// Fetch one animal
    #[oai(path = "/:animal_id", method = "get", tag = "AnimalTags::Animals")]
    async fn get_animal(&self, animal_id: Path<i32>) -> Result<Json<AnimalOut>, ClinicError> {
        let animal = self.animals.get(animal_id.0).await?;
        Ok(Json(animal.into()))
    }

    /// Update an animal
    #[oai(path = "/:animal_id", method = "put", tag = "AnimalTags::Animals")]
    async fn update_animal(
        &self,
        animal_id: Path<i32>,
        body: Json<AnimalUpdate>,
    ) -> Result<Json<AnimalOut>, ClinicError> {
        if let Some(chip_number) = &body.chip_number {
            validation::validate_chip_number(chip_number)
                .map_err(ClinicError::validation_failed)?;
        }

        let updated = self.animals.update(animal_id.0, &body.0).await?;
        Ok(Json(updated.into()))
    }

    /// Delete an animal
    #[oai(path = "/:animal_id", method = "delete", tag = "AnimalTags::Animals")]
    async fn delete_animal(&self, animal_id: Path<i32>) -> Result<(), ClinicError> {
        self.animals.delete(animal_id.0).await
    }
}
