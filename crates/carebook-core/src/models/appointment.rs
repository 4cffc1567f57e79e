//! Appointment model and status lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::moment;

/// Appointment status.
///
/// `Cancelled` is terminal. `Completed` is set by the visit-completion
/// surface outside this crate; the scheduler never transitions into it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppointmentStatus {
    Booked,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    /// Stored text form, matching the repository's CHECK constraint.
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Booked => "Booked",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::Completed => "Completed",
        }
    }
}

/// One scheduled encounter between a patient and a doctor.
///
/// `day_of_week` and `time_label` are projections of `scheduled_at`,
/// recomputed on every write. They exist for query and display
/// convenience and are never independent caller input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    /// Unique UUID
    pub id: String,
    /// Patient directory id
    pub patient_id: String,
    /// Doctor directory id
    pub doctor_id: String,
    /// Canonical moment of the appointment (UTC)
    pub scheduled_at: DateTime<Utc>,
    /// Lowercase weekday token derived from `scheduled_at`
    pub day_of_week: String,
    /// Display label derived from `scheduled_at`, e.g. "10:00 AM"
    pub time_label: String,
    /// Lifecycle status, `Booked` on creation
    pub status: AppointmentStatus,
    /// Free-text notes
    pub notes: Option<String>,
    /// Suggested next visit. Advisory only, never validated.
    pub follow_up_at: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl Appointment {
    /// Create a new `Booked` appointment at the given moment.
    pub fn new(patient_id: String, doctor_id: String, scheduled_at: DateTime<Utc>) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            patient_id,
            doctor_id,
            scheduled_at,
            day_of_week: moment::weekday_token(scheduled_at).to_string(),
            time_label: moment::time_label(scheduled_at),
            status: AppointmentStatus::Booked,
            notes: None,
            follow_up_at: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Move the appointment to a new moment, keeping the derived
    /// fields consistent with `scheduled_at`.
    pub fn reschedule_to(&mut self, new_moment: DateTime<Utc>) {
        self.scheduled_at = new_moment;
        self.day_of_week = moment::weekday_token(new_moment).to_string();
        self.time_label = moment::time_label(new_moment);
        self.touch();
    }

    /// Whether this appointment still occupies its doctor's slot.
    pub fn is_booked(&self) -> bool {
        self.status == AppointmentStatus::Booked
    }

    /// Touch the updated_at timestamp.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moment::combine;

    #[test]
    fn test_new_appointment_is_booked() {
        let moment_at = combine("2026-08-31", "10:00").unwrap();
        let appt = Appointment::new("patient-1".into(), "doctor-1".into(), moment_at);

        assert_eq!(appt.id.len(), 36); // UUID format
        assert!(appt.is_booked());
        assert_eq!(appt.day_of_week, "monday");
        assert_eq!(appt.time_label, "10:00 AM");
        assert!(appt.notes.is_none());
        assert!(appt.follow_up_at.is_none());
    }

    #[test]
    fn test_reschedule_recomputes_projections() {
        let moment_at = combine("2026-08-31", "10:00").unwrap();
        let mut appt = Appointment::new("patient-1".into(), "doctor-1".into(), moment_at);

        let new_moment = combine("2026-09-01", "14:30").unwrap();
        appt.reschedule_to(new_moment);

        assert_eq!(appt.scheduled_at, new_moment);
        assert_eq!(appt.day_of_week, "tuesday");
        assert_eq!(appt.time_label, "02:30 PM");
        assert!(appt.is_booked());
    }

    #[test]
    fn test_status_text_forms() {
        assert_eq!(AppointmentStatus::Booked.as_str(), "Booked");
        assert_eq!(AppointmentStatus::Cancelled.as_str(), "Cancelled");
        assert_eq!(AppointmentStatus::Completed.as_str(), "Completed");
    }
}
