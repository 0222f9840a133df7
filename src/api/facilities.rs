use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::errors::clinic::ClinicError;
use crate::services::validation;
use crate::stores::FacilityStore;
use crate::types::dto::facilities::{FacilityCreate, FacilityOut};

/// Facilities API
pub struct FacilitiesApi {
    facilities: Arc<FacilityStore>,
}

impl FacilitiesApi {
    pub fn new(facilities: Arc<FacilityStore>) -> Self {
        Self { facilities }
    }
}

/// API tags for facility endpoints
#[derive(Tags)]
enum FacilityTags {
    /// Facility management endpoints
    Facilities,
}

#[OpenApi(prefix_path = "/facilities")]
impl FacilitiesApi {
    /// Register a clinic facility
    #[oai(path = "/", method = "post", tag = "FacilityTags::Facilities")]
    async fn create_facility(
        &self,
        body: Json<FacilityCreate>,
    ) -> Result<Json<FacilityOut>, ClinicError> {
        validation::validate_phone_number(&body.phone_number)
            .map_err(ClinicError::validation_failed)?;

        let created = self.facilities.create(&body.0).await?;
        Ok(Json(created.into()))
    }

    /// List facilities
    #[oai(path = "/", method = "get", tag = "FacilityTags::Facilities")]
    async fn list_facilities(&self) -> Result<Json<Vec<FacilityOut>>, ClinicError> {
        let facilities = self.facilities.list().await?;
        Ok(Json(facilities.into_iter().map(Into::into).collect()))
    }

    /// Fetch one facility
    #[oai(path = "/:facility_id", method = "get", tag = "FacilityTags::Facilities")]
    async fn get_facility(&self, facility_id: Path<i32>) -> Result<Json<FacilityOut>, ClinicError> {
        let facility = self.facilities.get(facility_id.0).await?;
        Ok(Json(facility.into()))
    }

    /// Delete a facility
    #[oai(path = "/:facility_id", method = "delete", tag = "FacilityTags::Facilities")]
    async fn delete_facility(&self, facility_id: Path<i32>) -> Result<(), ClinicError> {
        self.facilities.delete(facility_id.0).await
    }
}
