//! Appointment repository operations.
//!
//! Query contract consumed by the scheduling engine: create, find by
//! id, find booked records for a doctor inside a time range (with
//! optional self-exclusion for reschedules), update schedule fields,
//! and flip status. Records are never deleted here.

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::{Appointment, AppointmentStatus};
use crate::moment;

const APPOINTMENT_COLUMNS: &str = "id, patient_id, doctor_id, scheduled_at, day_of_week, \
     time_label, status, notes, follow_up_at, created_at, updated_at";

impl Database {
    /// Insert a new appointment.
    pub fn insert_appointment(&self, appointment: &Appointment) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO appointments (
                id, patient_id, doctor_id, scheduled_at, day_of_week,
                time_label, status, notes, follow_up_at, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                appointment.id,
                appointment.patient_id,
                appointment.doctor_id,
                moment::to_storage(appointment.scheduled_at),
                appointment.day_of_week,
                appointment.time_label,
                appointment.status.as_str(),
                appointment.notes,
                appointment.follow_up_at.map(moment::to_storage),
                appointment.created_at,
                appointment.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Get an appointment by id.
    pub fn get_appointment(&self, id: &str) -> DbResult<Option<Appointment>> {
        self.conn
            .query_row(
                &format!("SELECT {APPOINTMENT_COLUMNS} FROM appointments WHERE id = ?"),
                [id],
                map_appointment_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// Booked appointments for a doctor with `scheduled_at` inside
    /// `[from, to]`, both bounds inclusive. `exclude` drops one id
    /// from the result, for reschedule self-checks. Cancelled and
    /// completed records never match.
    pub fn list_booked_between(
        &self,
        doctor_id: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        exclude: Option<&str>,
    ) -> DbResult<Vec<Appointment>> {
        let from_text = moment::to_storage(from);
        let to_text = moment::to_storage(to);

        let mut sql = format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments \
             WHERE doctor_id = ?1 AND status = 'Booked' \
             AND scheduled_at >= ?2 AND scheduled_at <= ?3"
        );
        if exclude.is_some() {
            sql.push_str(" AND id <> ?4");
        }
        sql.push_str(" ORDER BY scheduled_at");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut appointments = Vec::new();

        let rows: Vec<rusqlite::Result<AppointmentRow>> = match exclude {
            Some(excluded_id) => stmt
                .query_map(
                    params![doctor_id, from_text, to_text, excluded_id],
                    map_appointment_row,
                )?
                .collect(),
            None => stmt
                .query_map(params![doctor_id, from_text, to_text], map_appointment_row)?
                .collect(),
        };

        for row in rows {
            appointments.push(row?.try_into()?);
        }
        Ok(appointments)
    }

    /// Write back the schedule fields after a reschedule.
    pub fn update_appointment_schedule(&self, appointment: &Appointment) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE appointments SET
                scheduled_at = ?2,
                day_of_week = ?3,
                time_label = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
            params![
                appointment.id,
                moment::to_storage(appointment.scheduled_at),
                appointment.day_of_week,
                appointment.time_label,
                appointment.updated_at,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Flip an appointment's status. No state check: flipping to the
    /// current status is a successful no-op.
    pub fn set_appointment_status(&self, id: &str, status: AppointmentStatus) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE appointments SET status = ?2, updated_at = ?3 WHERE id = ?1",
            params![id, status.as_str(), chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(rows_affected > 0)
    }

    /// All appointments for a patient, newest first.
    pub fn list_appointments_for_patient(&self, patient_id: &str) -> DbResult<Vec<Appointment>> {
        self.list_appointments_by("patient_id", patient_id)
    }

    /// All appointments for a doctor, newest first.
    pub fn list_appointments_for_doctor(&self, doctor_id: &str) -> DbResult<Vec<Appointment>> {
        self.list_appointments_by("doctor_id", doctor_id)
    }

    fn list_appointments_by(&self, column: &str, id: &str) -> DbResult<Vec<Appointment>> {
        // `column` is one of two internal literals, never caller input
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {APPOINTMENT_COLUMNS} FROM appointments \
             WHERE {column} = ? ORDER BY scheduled_at DESC"
        ))?;

        let rows = stmt.query_map([id], map_appointment_row)?;

        let mut appointments = Vec::new();
        for row in rows {
            appointments.push(row?.try_into()?);
        }
        Ok(appointments)
    }
}

/// Intermediate row struct for database mapping.
struct AppointmentRow {
    id: String,
    patient_id: String,
    doctor_id: String,
    scheduled_at: String,
    day_of_week: String,
    time_label: String,
    status: String,
    notes: Option<String>,
    follow_up_at: Option<String>,
    created_at: String,
    updated_at: String,
}

fn map_appointment_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AppointmentRow> {
    Ok(AppointmentRow {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        doctor_id: row.get(2)?,
        scheduled_at: row.get(3)?,
        day_of_week: row.get(4)?,
        time_label: row.get(5)?,
        status: row.get(6)?,
        notes: row.get(7)?,
        follow_up_at: row.get(8)?,
        created_at: row.get(9)?,
        updated_at: row.get(10)?,
    })
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = DbError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        let scheduled_at = moment::from_storage(&row.scheduled_at)
            .map_err(|e| DbError::Constraint(e.to_string()))?;
        let follow_up_at = row
            .follow_up_at
            .as_deref()
            .map(moment::from_storage)
            .transpose()
            .map_err(|e| DbError::Constraint(e.to_string()))?;
        let status = string_to_status(&row.status)?;

        Ok(Appointment {
            id: row.id,
            patient_id: row.patient_id,
            doctor_id: row.doctor_id,
            scheduled_at,
            day_of_week: row.day_of_week,
            time_label: row.time_label,
            status,
            notes: row.notes,
            follow_up_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn string_to_status(s: &str) -> Result<AppointmentStatus, DbError> {
    match s {
        "Booked" => Ok(AppointmentStatus::Booked),
        "Cancelled" => Ok(AppointmentStatus::Cancelled),
        "Completed" => Ok(AppointmentStatus::Completed),
        _ => Err(DbError::Constraint(format!(
            "Unknown appointment status: {}",
            s
        ))),
    }
}
