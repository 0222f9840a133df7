use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, Set};

use crate::errors::clinic::ClinicError;
use crate::types::db::{appointment, invoice};
use crate::types::dto::invoices::InvoiceCreate;

fn db_error(e: sea_orm::DbErr) -> ClinicError {
    ClinicError::internal_error(format!("Database error: {}", e))
}

pub struct InvoiceStore {
    db: DatabaseConnection,
}

impl InvoiceStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Issue an invoice for an existing appointment
    pub async fn create(&self, data: &InvoiceCreate) -> Result<invoice::Model, ClinicError> {
        let appointment_exists = appointment::Entity::find_by_id(data.appointment_id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .is_some();
        if !appointment_exists {
            return Err(ClinicError::not_found("Appointment"));
        }

        if data.amount <= 0.0 {
            return Err(ClinicError::validation_failed(
                "Amount must be positive".to_string(),
            ));
        }

        let new_invoice = invoice::ActiveModel {
            appointment_id: Set(data.appointment_id),
            amount: Set(data.amount),
            currency: Set(data.currency.clone()),
            status: Set("pending".to_string()),
            issued_at: Set(Utc::now().timestamp()),
            ..Default::default()
        };

        new_invoice.insert(&self.db).await.map_err(db_error)
    }

    pub async fn list(&self) -> Result<Vec<invoice::Model>, ClinicError> {
        invoice::Entity::find().all(&self.db).await.map_err(db_error)
    }

    pub async fn get(&self, invoice_id: i32) -> Result<invoice::Model, ClinicError> {
        invoice::Entity::find_by_id(invoice_id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| ClinicError::not_found("Invoice"))
    }

    pub async fn set_status(&self, invoice_id: i32, status: &str) -> Result<invoice::Model, ClinicError> {
        if !matches!(status, "pending" | "paid" | "cancelled") {
            return Err(ClinicError::validation_failed(format!(
                "Unknown invoice status '{}'",
                status
            )));
        }

        let existing = self.get(invoice_id).await?;
        let mut active: invoice::ActiveModel = existing.into();
        active.status = Set(status.to_string());
        active.update(&self.db).await.map_err(db_error)
    }

    pub async fn delete(&self, invoice_id: i32) -> Result<(), ClinicError> {
        let invoice = self.get(invoice_id).await?;
        invoice.delete(&self.db).await.map_err(db_error)?;
        Ok(())
    }
}
