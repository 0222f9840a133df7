use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::facility;

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct FacilityCreate {
    pub name: String,
    pub address: String,
    pub phone_number: String,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct FacilityOut {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub phone_number: String,
}

impl From<facility::Model> for FacilityOut {
    fn from(m: facility::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            address: m.address,
            phone_number: m.phone_number,
        }
    }
}
