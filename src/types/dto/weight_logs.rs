use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::weight_log;

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct WeightLogCreate {
    pub animal_id: i32,
    pub weight_kg: f64,

    /// Measurement time (Unix timestamp); defaults to now
    pub measured_at: Option<i64>,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct WeightLogOut {
    pub id: i32,
    pub animal_id: i32,
    pub weight_kg: f64,
    pub measured_at: i64,
}

impl From<weight_log::Model> for WeightLogOut {
    fn from(m: weight_log::Model) -> Self {
        Self {
            id: m.id,
            animal_id: m.animal_id,
            weight_kg: m.weight_kg,
            measured_at: m.measured_at,
        }
    }
}
