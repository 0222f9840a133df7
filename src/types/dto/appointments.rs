use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::appointment;

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AppointmentCreate {
    pub owner_id: i32,
    pub doctor_id: i32,
    pub animal_id: i32,

    /// Scheduled time (Unix timestamp)
    pub scheduled_at: i64,

    pub reason: String,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AppointmentUpdate {
    pub doctor_id: Option<i32>,
    pub scheduled_at: Option<i64>,
    pub reason: Option<String>,

    /// One of "scheduled", "completed", "cancelled"
    pub status: Option<String>,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AppointmentOut {
    pub id: i32,
    pub owner_id: i32,
    pub doctor_id: i32,
    pub animal_id: i32,
    pub scheduled_at: i64,
    pub reason: String,
    pub status: String,
}

impl From<appointment::Model> for AppointmentOut {
    fn from(m: appointment::Model) -> Self {
        Self {
            id: m.id,
            owner_id: m.owner_id,
            doctor_id: m.doctor_id,
            animal_id: m.animal_id,
            scheduled_at: m.scheduled_at,
            reason: m.reason,
            status: m.status,
        }
    }
}
