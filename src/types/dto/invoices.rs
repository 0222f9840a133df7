use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::types::db::invoice;

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct InvoiceCreate {
    pub appointment_id: i32,
    pub amount: f64,

    /// ISO 4217 currency code
    pub currency: String,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct InvoiceStatusUpdate {
    /// One of "pending", "paid", "cancelled"
    pub status: String,
}

#[derive(Object, Debug, Serialize, Deserialize)]
pub struct InvoiceOut {
    pub id: i32,
    pub appointment_id: i32,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    pub issued_at: i64,
}

impl From<invoice::Model> for InvoiceOut {
    fn from(m: invoice::Model) -> Self {
        Self {
            id: m.id,
            appointment_id: m.appointment_id,
            amount: m.amount,
            currency: m.currency,
            status: m.status,
            issued_at: m.issued_at,
        }
    }
}
