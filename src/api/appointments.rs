use poem_openapi::{param::Path, payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::errors::clinic::ClinicError;
use crate::stores::AppointmentStore;
use crate::types::dto::appointments::{AppointmentCreate, AppointmentOut, AppointmentUpdate};

/// Appointments API
pub struct AppointmentsApi {
    appointments: Arc<AppointmentStore>,
}

impl AppointmentsApi {
    pub fn new(appointments: Arc<AppointmentStore>) -> Self {
        Self { appointments }
    }
}

/// API tags for appointment endpoints
#[derive(Tags)]
enum AppointmentTags {
    /// Appointment management endpoints
    Appointments,
}

#[OpenApi(prefix_path = "/appointments")]
impl AppointmentsApi {
    /// Schedule an appointment for an existing client, doctor and animal
    #[oai(path = "/", method = "post", tag = "AppointmentTags::Appointments")]
    async fn create_appointment(
        &self,
        body: Json<AppointmentCreate>,
    ) -> Result<Json<AppointmentOut>, ClinicError> {
        let created = self.appointments.create(&body.0).await?;
        Ok(Json(created.into()))
    }

    /// List appointments
    #[oai(path = "/", method = "get", tag = "AppointmentTags::Appointments")]
    async fn list_appointments(&self) -> Result<Json<Vec<AppointmentOut>>, ClinicError> {
        let appointments = self.appointments.list().await?;
        Ok(Json(appointments.into_iter().map(Into::into).collect()))
    }

    /// Fetch one appointment
    #[oai(path = "/:appointment_id", method = "get", tag = "AppointmentTags::Appointments")]
    async fn get_appointment(
        &self,
        appointment_id: Path<i32>,
    ) -> Result<Json<AppointmentOut>, ClinicError> {
        let appointment = self.appointments.get(appointment_id.0).await?;
        Ok(Json(appointment.into()))
    }

    /// Update an appointment
    #[oai(path = "/:appointment_id", method = "put", tag = "AppointmentTags::Appointments")]
    async fn update_appointment(
        &self,
        appointment_id: Path<i32>,
        body: Json<AppointmentUpdate>,
    ) -> Result<Json<AppointmentOut>, ClinicError> {
        let updated = self.appointments.update(appointment_id.0, &body.0).await?;
        Ok(Json(updated.into()))
    }

    /// Cancel and remove an appointment
    #[oai(path = "/:appointment_id", method = "delete", tag = "AppointmentTags::Appointments")]
    async fn delete_appointment(&self, appointment_id: Path<i32>) -> Result<(), ClinicError> {
        self.appointments.delete(appointment_id.0).await
    }
}
