use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::errors::clinic::ClinicError;
use crate::stores::InvoiceStore;
use crate::types::dto::invoices::{InvoiceCreate, InvoiceOut, InvoiceStatusUpdate};

/// Invoices API. Payment-provider integration is out of scope; invoices
/// are plain billing records whose status is set explicitly.
pub struct InvoicesApi {
    invoices: Arc<InvoiceStore>,
}

impl InvoicesApi {
    pub fn new(invoices: Arc<InvoiceStore>) -> Self {
        Self { invoices }
    }
}

/// API tags for invoice endpoints
#[derive(Tags)]
enum InvoiceTags {
    /// Invoice endpoints
    Invoices,
}

#[OpenApi(prefix_path = "/invoices")]
impl InvoicesApi {
    /// Issue an invoice for an appointment
    #[oai(path = "/", method = "post", tag = "InvoiceTags::Invoices")]
    async fn create_invoice(&self, body: Json<InvoiceCreate>) -> Result<Json<InvoiceOut>, ClinicError> {
        let created = self.invoices.create(&body.0).await?;
        Ok(Json(created.into()))
    }

    /// List invoices
    #[oai(path = "/", method = "get", tag = "InvoiceTags::Invoices")]
    async fn list_invoices(&self) -> Result<Json<Vec<InvoiceOut>>, ClinicError> {
        let invoices = self.invoices.list().await?;
        Ok(Json(invoices.into_iter().map(Into::into).collect()))
    }

    /// Fetch one invoice
    #[oai(path = "/:invoice_id", method = "get", tag = "InvoiceTags::Invoices")]
    async fn get_invoice(&self, invoice_id: Path<i32>) -> Result<Json<InvoiceOut>, ClinicError> {
        let invoice = self.invoices.get(invoice_id.0).await?;
        Ok(Json(invoice.into()))
    }

    /// Update the invoice status
    #[oai(path = "/:invoice_id/status", method = "put", tag = "InvoiceTags::Invoices")]
    async fn set_status(
        &self,
        invoice_id: Path<i32>,
        body: Json<InvoiceStatusUpdate>,
    ) -> Result<Json<InvoiceOut>, ClinicError> {
        let updated = self.invoices.set_status(invoice_id.0, &body.status).await?;
        Ok(Json(updated.into()))
    }

    /// Delete an invoice
    #[oai(path = "/:invoice_id", method = "delete", tag = "InvoiceTags::Invoices")]
    async fn delete_invoice(&self, invoice_id: Path<i32>) -> Result<(), ClinicError> {
        self.invoices.delete(invoice_id.0).await
    }
}
