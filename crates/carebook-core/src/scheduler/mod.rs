//! Scheduling engine: booking, cancellation, rescheduling.
//!
//! Per-appointment state machine: `Booked → Cancelled` (terminal,
//! one-way) and `Booked → Booked` (reschedule, mutated fields). No
//! other self-service transition exists.

mod conflict;

pub use conflict::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::availability::{check_availability, Unavailable};
use crate::db::{Database, DbError};
use crate::models::{Appointment, AppointmentStatus};
use crate::moment::{self, MomentError};

/// Scheduling errors. Every precondition failure is a distinct,
/// user-displayable outcome; storage failures pass through opaquely
/// as `Database` and are never reinterpreted as a domain kind.
#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("missing required fields")]
    MissingFields,

    #[error("doctor not available or not approved")]
    DoctorUnavailable,

    #[error("patient not approved")]
    PatientNotApproved,

    #[error("invalid date or time: {0}")]
    InvalidMoment(#[from] MomentError),

    #[error("{0}")]
    OutsideAvailability(#[from] Unavailable),

    #[error("doctor already has an appointment near this time")]
    SchedulingConflict,

    #[error("appointment not found")]
    AppointmentNotFound,

    #[error("storage error: {0}")]
    Database(#[from] DbError),
}

pub type SchedResult<T> = Result<T, SchedulingError>;

/// A booking request as received from the request-handling layer.
/// `date` and `time` arrive as separate strings (`"2026-08-31"`,
/// `"10:00"`); absent fields deserialize to empty strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingRequest {
    #[serde(default)]
    pub patient_id: String,
    #[serde(default)]
    pub doctor_id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub follow_up_at: Option<DateTime<Utc>>,
}

/// The scheduling engine. Resolves eligibility through the doctor and
/// patient directories, validates availability, consults the conflict
/// detector, then writes through the appointment repository.
pub struct Scheduler<'a> {
    db: &'a Database,
    conflicts: ConflictDetector<'a>,
}

impl<'a> Scheduler<'a> {
    /// Create a scheduler over a database.
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            conflicts: ConflictDetector::new(db),
        }
    }

    /// Book a new appointment. Preconditions run in a fixed order,
    /// each with its own failure: required fields present, doctor
    /// exists and is approved, patient exists and is approved, the
    /// combined moment parses, the moment is within the doctor's
    /// availability, and no booked appointment collides.
    ///
    /// The conflict query and the insert are separate statements: two
    /// concurrent bookings for the same slot can both pass the check
    /// before either writes. Callers needing strict exclusivity must
    /// serialize bookings per doctor or add a uniqueness constraint at
    /// the repository.
    pub fn book(&self, request: &BookingRequest) -> SchedResult<Appointment> {
        if request.patient_id.trim().is_empty()
            || request.doctor_id.trim().is_empty()
            || request.date.trim().is_empty()
            || request.time.trim().is_empty()
        {
            return Err(SchedulingError::MissingFields);
        }

        let doctor = self
            .db
            .get_doctor(&request.doctor_id)?
            .filter(|d| d.approved)
            .ok_or(SchedulingError::DoctorUnavailable)?;

        let patient = self
            .db
            .get_patient(&request.patient_id)?
            .filter(|p| p.is_approved)
            .ok_or(SchedulingError::PatientNotApproved)?;

        let moment_at = moment::combine(&request.date, &request.time)?;
        check_availability(&doctor, moment_at)?;

        if self.conflicts.has_conflict(&doctor.id, moment_at, None)? {
            return Err(SchedulingError::SchedulingConflict);
        }

        let mut appointment = Appointment::new(patient.id, doctor.id, moment_at);
        appointment.notes = request.notes.clone();
        appointment.follow_up_at = request.follow_up_at;
        self.db.insert_appointment(&appointment)?;

        info!(
            "Booked appointment {} for doctor {} at {}",
            appointment.id, appointment.doctor_id, moment_at
        );
        Ok(appointment)
    }

    /// Cancel an appointment. The status flip is unconditional for an
    /// existing record, with no re-validation of time windows:
    /// cancelling an already-cancelled appointment is a no-op success.
    pub fn cancel(&self, appointment_id: &str) -> SchedResult<()> {
        let updated = self
            .db
            .set_appointment_status(appointment_id, AppointmentStatus::Cancelled)?;
        if !updated {
            return Err(SchedulingError::AppointmentNotFound);
        }
        info!("Cancelled appointment {}", appointment_id);
        Ok(())
    }

    /// Move an existing appointment to a new moment. The appointment
    /// must not be cancelled; the doctor on record must still be
    /// approved; the new moment must pass the same availability and
    /// conflict checks as a booking, with the appointment excluded
    /// from its own conflict check.
    ///
    /// Same check-then-write race window as [`Scheduler::book`].
    pub fn reschedule(
        &self,
        appointment_id: &str,
        new_moment: DateTime<Utc>,
    ) -> SchedResult<Appointment> {
        let mut appointment = self
            .db
            .get_appointment(appointment_id)?
            .filter(|a| a.status != AppointmentStatus::Cancelled)
            .ok_or(SchedulingError::AppointmentNotFound)?;

        let doctor = self
            .db
            .get_doctor(&appointment.doctor_id)?
            .filter(|d| d.approved)
            .ok_or(SchedulingError::DoctorUnavailable)?;

        check_availability(&doctor, new_moment)?;

        if self
            .conflicts
            .has_conflict(&doctor.id, new_moment, Some(&appointment.id))?
        {
            return Err(SchedulingError::SchedulingConflict);
        }

        appointment.reschedule_to(new_moment);
        self.db.update_appointment_schedule(&appointment)?;

        info!(
            "Rescheduled appointment {} to {}",
            appointment.id, new_moment
        );
        Ok(appointment)
    }

    /// Reschedule from a caller-supplied combined value: either
    /// RFC 3339 or a bare `"YYYY-MM-DD HH:MM"` pair.
    pub fn reschedule_from_str(
        &self,
        appointment_id: &str,
        new_moment: &str,
    ) -> SchedResult<Appointment> {
        if new_moment.trim().is_empty() {
            return Err(SchedulingError::MissingFields);
        }
        let parsed = moment::parse_moment(new_moment)?;
        self.reschedule(appointment_id, parsed)
    }

    /// Get the conflict detector for direct access.
    pub fn conflicts(&self) -> &ConflictDetector<'a> {
        &self.conflicts
    }
}
