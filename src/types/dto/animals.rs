use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::animal;

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AnimalCreate {
    pub owner_id: i32,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub birth_date: Option<String>,

    /// 15-digit microchip number
    pub chip_number: Option<String>,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AnimalUpdate {
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub birth_date: Option<String>,
    pub chip_number: Option<String>,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct AnimalOut {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub birth_date: Option<String>,
    pub chip_number: Option<String>,
}

impl From<animal::Model> for AnimalOut {
    fn from(m: animal::Model) -> Self {
        Self {
            id: m.id,
            owner_id: m.owner_id,
            name: m.name,
            species: m.species,
            breed: m.breed,
            birth_date: m.birth_date,
            chip_number: m.chip_number,
        }
    }
}
