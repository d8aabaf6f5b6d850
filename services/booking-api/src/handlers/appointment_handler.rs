use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{Appointment, NewAppointment};
use crate::errors::ApiError;
use crate::handlers::{body_error, query_error};
use crate::services::AppointmentService;
use crate::state::AppState;

const INCOMPLETE_SUBMISSION: &str = "Incomplete parameters: missing required information";
const MISSING_USER_ID: &str = "Missing userId parameter";
const INCOMPLETE_CANCEL: &str = "Missing appointmentId or userId";

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAppointmentRequest {
    #[validate(required, length(min = 1))]
    pub service_type: Option<String>,
    pub service_type_name: Option<String>,
    #[validate(required, length(min = 1))]
    pub date: Option<String>,
    #[validate(required, length(min = 1))]
    pub time: Option<String>,
    #[validate(required, length(min = 1))]
    pub user_id: Option<String>,
    pub user_name: Option<String>,
}

impl SubmitAppointmentRequest {
    fn into_new_appointment(self) -> Result<NewAppointment, ApiError> {
        self.validate().map_err(|e| {
            tracing::debug!("Rejected appointment submission: {}", e);
            ApiError::validation(INCOMPLETE_SUBMISSION)
        })?;

        let service_type = self.service_type.unwrap_or_default();
        let service_type_name = self
            .service_type_name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| service_type.clone());

        Ok(NewAppointment {
            user_id: self.user_id.unwrap_or_default(),
            user_name: self.user_name,
            service_type,
            service_type_name,
            date: self.date.unwrap_or_default(),
            time: self.time.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAppointmentResponse {
    pub success: bool,
    pub message: String,
    pub appointment_id: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MyAppointmentsQuery {
    #[validate(required, length(min = 1))]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AppointmentListResponse {
    pub success: bool,
    pub appointments: Vec<Appointment>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CancelAppointmentRequest {
    #[validate(required, length(min = 1))]
    pub appointment_id: Option<String>,
    #[validate(required, length(min = 1))]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Book an appointment
pub async fn submit_appointment(
    State(state): State<AppState>,
    payload: Result<Json<SubmitAppointmentRequest>, JsonRejection>,
) -> Result<Json<SubmitAppointmentResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| body_error(e, INCOMPLETE_SUBMISSION))?;
    let new = request.into_new_appointment()?;

    let appointment = AppointmentService::submit(&state.appointments, new).await;

    Ok(Json(SubmitAppointmentResponse {
        success: true,
        message: "Appointment booked".to_string(),
        appointment_id: appointment.id,
    }))
}

/// List a user's appointments
pub async fn my_appointments(
    State(state): State<AppState>,
    query: Result<Query<MyAppointmentsQuery>, QueryRejection>,
) -> Result<Json<AppointmentListResponse>, ApiError> {
    let Query(query) = query.map_err(|e| query_error(e, MISSING_USER_ID))?;
    query
        .validate()
        .map_err(|_| ApiError::validation(MISSING_USER_ID))?;
    let user_id = query.user_id.unwrap_or_default();

    let appointments = AppointmentService::list(&state.appointments, &user_id).await;

    Ok(Json(AppointmentListResponse {
        success: true,
        appointments,
    }))
}

/// Cancel an appointment; always reports success once the request is well-formed
pub async fn cancel_appointment(
    State(state): State<AppState>,
    payload: Result<Json<CancelAppointmentRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| body_error(e, INCOMPLETE_CANCEL))?;
    request
        .validate()
        .map_err(|_| ApiError::validation(INCOMPLETE_CANCEL))?;

    let appointment_id = request.appointment_id.unwrap_or_default();
    let user_id = request.user_id.unwrap_or_default();

    AppointmentService::cancel(&state.appointments, &user_id, &appointment_id).await;

    Ok(Json(MessageResponse {
        success: true,
        message: "Appointment cancelled".to_string(),
    }))
}
