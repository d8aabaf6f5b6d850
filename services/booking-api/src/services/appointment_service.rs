use chrono::Utc;
use tracing::{info, warn};

use crate::domain::{sample_appointments, Appointment, NewAppointment};
use crate::repo::{AppointmentRepo, CancelOutcome};

pub struct AppointmentService;

impl AppointmentService {
    pub async fn submit(repo: &AppointmentRepo, new: NewAppointment) -> Appointment {
        let user_id = new.user_id.clone();
        let user_name = new.user_name.clone().unwrap_or_default();

        let appointment = repo.insert(new, Utc::now()).await;

        info!(
            "New appointment {}: {} on {} {} for {}({})",
            appointment.id,
            appointment.service_type,
            appointment.date,
            appointment.time,
            user_name,
            user_id
        );

        appointment
    }

    /// Sample bookings followed by the user's own, newest first.
    pub async fn list(repo: &AppointmentRepo, user_id: &str) -> Vec<Appointment> {
        let mut appointments = sample_appointments();
        appointments.extend(repo.list_for_user(user_id).await);

        info!("Listing {} appointments for {}", appointments.len(), user_id);
        appointments
    }

    pub async fn cancel(
        repo: &AppointmentRepo,
        user_id: &str,
        appointment_id: &str,
    ) -> CancelOutcome {
        let outcome = repo.cancel(user_id, appointment_id).await;

        match &outcome {
            CancelOutcome::Cancelled => {
                info!("Cancelled appointment {} for {}", appointment_id, user_id)
            }
            CancelOutcome::NotCancellable(status) => warn!(
                "Appointment {} for {} is {:?}, left unchanged",
                appointment_id, user_id, status
            ),
            CancelOutcome::NotFound => warn!(
                "Cancel requested for unknown appointment {} by {}",
                appointment_id, user_id
            ),
        }

        outcome
    }
}
