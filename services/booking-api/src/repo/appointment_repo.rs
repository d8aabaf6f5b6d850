use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::domain::{location_for, Appointment, AppointmentStatus, NewAppointment};

const ID_PREFIX: &str = "APT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelOutcome {
    Cancelled,
    NotCancellable(AppointmentStatus),
    NotFound,
}

/// In-process appointment book, keyed by user id. Lost on restart.
#[derive(Default)]
pub struct AppointmentRepo {
    by_user: RwLock<HashMap<String, Vec<Appointment>>>,
    last_id_millis: AtomicI64,
}

impl AppointmentRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new pending appointment and return it with its id assigned.
    pub async fn insert(&self, new: NewAppointment, now: DateTime<Utc>) -> Appointment {
        let appointment = Appointment {
            id: self.next_id(now.timestamp_millis()),
            location: location_for(&new.service_type).to_string(),
            service_type: new.service_type,
            service_type_name: new.service_type_name,
            date: new.date,
            time: new.time,
            status: AppointmentStatus::Pending,
            created_at: now,
        };

        self.by_user
            .write()
            .await
            .entry(new.user_id)
            .or_default()
            .push(appointment.clone());

        appointment
    }

    /// A user's appointments, newest first.
    pub async fn list_for_user(&self, user_id: &str) -> Vec<Appointment> {
        let guard = self.by_user.read().await;
        guard
            .get(user_id)
            .map(|items| items.iter().rev().cloned().collect())
            .unwrap_or_default()
    }

    pub async fn cancel(&self, user_id: &str, appointment_id: &str) -> CancelOutcome {
        let mut guard = self.by_user.write().await;
        let Some(appointment) = guard
            .get_mut(user_id)
            .and_then(|items| items.iter_mut().find(|a| a.id == appointment_id))
        else {
            return CancelOutcome::NotFound;
        };

        if !appointment.status.is_cancellable() {
            return CancelOutcome::NotCancellable(appointment.status);
        }

        appointment.status = AppointmentStatus::Cancelled;
        CancelOutcome::Cancelled
    }

    /// `APT<millis>`, bumped past the previous id when two submissions share a millisecond.
    fn next_id(&self, now_millis: i64) -> String {
        let bump = |last: i64| now_millis.max(last + 1);
        let previous = self
            .last_id_millis
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(bump(last)))
            .unwrap_or_else(|last| last);

        format!("{}{}", ID_PREFIX, bump(previous))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::collections::HashSet;

    fn booking(user_id: &str, service_type: &str) -> NewAppointment {
        NewAppointment {
            user_id: user_id.to_string(),
            user_name: Some("Han Meimei".to_string()),
            service_type: service_type.to_string(),
            service_type_name: "Onboarding".to_string(),
            date: "2024-03-01".to_string(),
            time: "09:00 - 10:00".to_string(),
        }
    }

    fn at_millis(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[tokio::test]
    async fn insert_assigns_time_based_id_and_location() {
        let repo = AppointmentRepo::new();
        let created = repo
            .insert(booking("u1", "entry"), at_millis(1_700_000_000_123))
            .await;

        assert_eq!(created.id, "APT1700000000123");
        assert_eq!(created.status, AppointmentStatus::Pending);
        assert_eq!(created.location, "HR Service Hall, Window 3");
    }

    #[tokio::test]
    async fn ids_stay_unique_within_the_same_millisecond() {
        let repo = AppointmentRepo::new();
        let now = at_millis(1_700_000_000_000);

        let mut ids = HashSet::new();
        for _ in 0..50 {
            ids.insert(repo.insert(booking("u1", "entry"), now).await.id);
        }

        assert_eq!(ids.len(), 50);
    }

    #[tokio::test]
    async fn ids_never_go_backwards_when_the_clock_does() {
        let repo = AppointmentRepo::new();
        let first = repo.insert(booking("u1", "entry"), at_millis(2_000)).await;
        let second = repo.insert(booking("u1", "entry"), at_millis(1_000)).await;

        assert_eq!(first.id, "APT2000");
        assert_eq!(second.id, "APT2001");
    }

    #[tokio::test]
    async fn listing_is_per_user_and_newest_first() {
        let repo = AppointmentRepo::new();
        let older = repo.insert(booking("u1", "entry"), at_millis(1_000)).await;
        let newer = repo.insert(booking("u1", "settlement"), at_millis(2_000)).await;
        repo.insert(booking("u2", "entry"), at_millis(3_000)).await;

        let listed = repo.list_for_user("u1").await;
        assert_eq!(
            listed.iter().map(|a| a.id.as_str()).collect::<Vec<_>>(),
            vec![newer.id.as_str(), older.id.as_str()]
        );
        assert!(repo.list_for_user("nobody").await.is_empty());
    }

    #[tokio::test]
    async fn cancel_transitions_pending_only_once() {
        let repo = AppointmentRepo::new();
        let created = repo.insert(booking("u1", "entry"), at_millis(1_000)).await;

        assert_eq!(repo.cancel("u1", &created.id).await, CancelOutcome::Cancelled);
        assert_eq!(
            repo.cancel("u1", &created.id).await,
            CancelOutcome::NotCancellable(AppointmentStatus::Cancelled)
        );
        assert_eq!(
            repo.list_for_user("u1").await[0].status,
            AppointmentStatus::Cancelled
        );
    }

    #[tokio::test]
    async fn cancel_is_scoped_to_the_owner() {
        let repo = AppointmentRepo::new();
        let created = repo.insert(booking("u1", "entry"), at_millis(1_000)).await;

        assert_eq!(repo.cancel("u2", &created.id).await, CancelOutcome::NotFound);
        assert_eq!(
            repo.list_for_user("u1").await[0].status,
            AppointmentStatus::Pending
        );
    }
}
