use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn is_cancellable(self) -> bool {
        matches!(self, AppointmentStatus::Pending)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub service_type: String,
    pub service_type_name: String,
    pub date: String,
    pub time: String,
    pub status: AppointmentStatus,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

/// A validated booking request, ready to be recorded.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub user_id: String,
    pub user_name: Option<String>,
    pub service_type: String,
    pub service_type_name: String,
    pub date: String,
    pub time: String,
}

// Service hall window per service type code
const SERVICE_LOCATIONS: &[(&str, &str)] = &[
    ("settlement", "HR Service Hall, Window 1"),
    ("resignation", "HR Service Hall, Window 2"),
    ("entry", "HR Service Hall, Window 3"),
];

const DEFAULT_LOCATION: &str = "HR Service Hall, General Counter";

pub fn location_for(service_type: &str) -> &'static str {
    SERVICE_LOCATIONS
        .iter()
        .find(|(code, _)| *code == service_type)
        .map(|(_, location)| *location)
        .unwrap_or(DEFAULT_LOCATION)
}

/// The two sample bookings every user sees in the listing.
pub fn sample_appointments() -> Vec<Appointment> {
    vec![
        Appointment {
            id: "APT1620000000001".to_string(),
            service_type: "settlement".to_string(),
            service_type_name: "Household registration".to_string(),
            date: "2023-06-15".to_string(),
            time: "10:00 - 11:00".to_string(),
            status: AppointmentStatus::Pending,
            location: location_for("settlement").to_string(),
            created_at: fixture_time(2023, 6, 10, 14, 30),
        },
        Appointment {
            id: "APT1620000000002".to_string(),
            service_type: "entry".to_string(),
            service_type_name: "Onboarding".to_string(),
            date: "2023-06-10".to_string(),
            time: "09:00 - 10:00".to_string(),
            status: AppointmentStatus::Completed,
            location: location_for("entry").to_string(),
            created_at: fixture_time(2023, 6, 5, 9, 15),
        },
    ]
}

fn fixture_time(year: i32, month: u32, day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, 0)
        .single()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn appointments_serialize_with_camel_case_and_lowercase_status() {
        let value = serde_json::to_value(&sample_appointments()[0]).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "APT1620000000001",
                "serviceType": "settlement",
                "serviceTypeName": "Household registration",
                "date": "2023-06-15",
                "time": "10:00 - 11:00",
                "status": "pending",
                "location": "HR Service Hall, Window 1",
                "createdAt": "2023-06-10T14:30:00Z"
            })
        );
    }

    #[test]
    fn unknown_service_types_go_to_the_general_counter() {
        assert_eq!(location_for("entry"), "HR Service Hall, Window 3");
        assert_eq!(location_for("passport"), DEFAULT_LOCATION);
    }

    #[test]
    fn only_pending_appointments_can_be_cancelled() {
        assert!(AppointmentStatus::Pending.is_cancellable());
        assert!(!AppointmentStatus::Completed.is_cancellable());
        assert!(!AppointmentStatus::Cancelled.is_cancellable());
    }
}
