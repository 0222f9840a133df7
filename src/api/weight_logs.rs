use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::errors::clinic::ClinicError;
use crate::stores::WeightLogStore;
use crate::types::dto::weight_logs::{WeightLogCreate, WeightLogOut};

/// Weight logs API
pub struct WeightLogsApi {
    weight_logs: Arc<WeightLogStore>,
}

impl WeightLogsApi {
    pub fn new(weight_logs: Arc<WeightLogStore>) -> Self {
        Self { weight_logs }
    }
}

/// API tags for weight log endpoints
#[derive(Tags)]
enum WeightLogTags {
    /// Weight tracking endpoints
    WeightLogs,
}

#[OpenApi(prefix_path = "/weight-logs")]
impl WeightLogsApi {
    /// Record a weight measurement for an animal
    #[oai(path = "/", method = "post", tag = "WeightLogTags::WeightLogs")]
    async fn create_weight_log(
        &self,
        body: Json<WeightLogCreate>,
    ) -> Result<Json<WeightLogOut>, ClinicError> {
        let created = self.weight_logs.create(&body.0).await?;
        Ok(Json(created.into()))
    }

    /// Weight history of one animal, oldest first
    #[oai(path = "/animal/:animal_id", method = "get", tag = "WeightLogTags::WeightLogs")]
    async fn list_by_animal(
        &self,
        animal_id: Path<i32>,
    ) -> Result<Json<Vec<WeightLogOut>>, ClinicError> {
        let logs = self.weight_logs.list_by_animal(animal_id.0).await?;
        Ok(Json(logs.into_iter().map(Into::into).collect()))
    }

    /// Delete a weight measurement
    #[oai(path = "/:weight_log_id", method = "delete", tag = "WeightLogTags::WeightLogs")]
    async fn delete_weight_log(&self, weight_log_id: Path<i32>) -> Result<(), ClinicError> {
        self.weight_logs.delete(weight_log_id.0).await
    }
}
