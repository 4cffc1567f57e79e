//! Doctor directory operations.

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::models::Doctor;

impl Database {
    /// Insert a new doctor.
    pub fn insert_doctor(&self, doctor: &Doctor) -> DbResult<()> {
        let working_days_json = serde_json::to_string(&doctor.working_days)?;

        self.conn.execute(
            r#"
            INSERT INTO doctors (
                id, name, specialization, timings, working_days,
                approved, emergency_available, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                doctor.id,
                doctor.name,
                doctor.specialization,
                doctor.timings,
                working_days_json,
                doctor.approved,
                doctor.emergency_available,
                doctor.created_at,
                doctor.updated_at,
            ],
        )?;
        Ok(())
    }

    /// Get a doctor by id.
    pub fn get_doctor(&self, id: &str) -> DbResult<Option<Doctor>> {
        self.conn
            .query_row(
                r#"
                SELECT id, name, specialization, timings, working_days,
                       approved, emergency_available, created_at, updated_at
                FROM doctors
                WHERE id = ?
                "#,
                [id],
                map_doctor_row,
            )
            .optional()?
            .map(|row| row.try_into())
            .transpose()
    }

    /// Flip the administrative approval gate.
    pub fn approve_doctor(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            "UPDATE doctors SET approved = 1, updated_at = ?2 WHERE id = ?1",
            params![id, chrono::Utc::now().to_rfc3339()],
        )?;
        Ok(rows_affected > 0)
    }

    /// List approved doctors flagged as available for emergencies.
    pub fn list_emergency_doctors(&self) -> DbResult<Vec<Doctor>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, name, specialization, timings, working_days,
                   approved, emergency_available, created_at, updated_at
            FROM doctors
            WHERE approved = 1 AND emergency_available = 1
            ORDER BY name
            "#,
        )?;

        let rows = stmt.query_map([], map_doctor_row)?;

        let mut doctors = Vec::new();
        for row in rows {
            doctors.push(row?.try_into()?);
        }
        Ok(doctors)
    }
}

/// Intermediate row struct for database mapping.
struct DoctorRow {
    id: String,
    name: String,
    specialization: Option<String>,
    timings: String,
    working_days: String,
    approved: bool,
    emergency_available: bool,
    created_at: String,
    updated_at: String,
}

fn map_doctor_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DoctorRow> {
    Ok(DoctorRow {
        id: row.get(0)?,
        name: row.get(1)?,
        specialization: row.get(2)?,
        timings: row.get(3)?,
        working_days: row.get(4)?,
        approved: row.get(5)?,
        emergency_available: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

impl TryFrom<DoctorRow> for Doctor {
    type Error = DbError;

    fn try_from(row: DoctorRow) -> Result<Self, Self::Error> {
        let working_days: Vec<String> = serde_json::from_str(&row.working_days)?;

        Ok(Doctor {
            id: row.id,
            name: row.name,
            specialization: row.specialization,
            timings: row.timings,
            working_days,
            approved: row.approved,
            emergency_available: row.emergency_available,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let db = setup_db();

        let mut doctor = Doctor::new(
            "Dr. Rao".into(),
            "11 AM - 4 PM".into(),
            vec!["monday".into(), "thursday".into()],
        );
        doctor.specialization = Some("Cardiology".into());

        db.insert_doctor(&doctor).unwrap();

        let retrieved = db.get_doctor(&doctor.id).unwrap().unwrap();
        assert_eq!(retrieved.name, "Dr. Rao");
        assert_eq!(retrieved.timings, "11 AM - 4 PM");
        assert_eq!(retrieved.working_days, vec!["monday", "thursday"]);
        assert_eq!(retrieved.specialization, Some("Cardiology".into()));
        assert!(!retrieved.approved);
    }

    #[test]
    fn test_get_missing_doctor() {
        let db = setup_db();
        assert!(db.get_doctor("no-such-id").unwrap().is_none());
    }

    #[test]
    fn test_approve_doctor() {
        let db = setup_db();

        let doctor = Doctor::new("Dr. Rao".into(), "9 AM - 5 PM".into(), vec!["monday".into()]);
        db.insert_doctor(&doctor).unwrap();

        assert!(db.approve_doctor(&doctor.id).unwrap());
        assert!(db.get_doctor(&doctor.id).unwrap().unwrap().approved);

        assert!(!db.approve_doctor("no-such-id").unwrap());
    }

    #[test]
    fn test_list_emergency_doctors() {
        let db = setup_db();

        let mut on_call = Doctor::new("Dr. Ern".into(), "9 AM - 5 PM".into(), vec!["monday".into()]);
        on_call.approved = true;
        on_call.emergency_available = true;
        db.insert_doctor(&on_call).unwrap();

        // Emergency-available but not approved: excluded
        let mut unapproved = Doctor::new("Dr. New".into(), "9 AM - 5 PM".into(), vec!["monday".into()]);
        unapproved.emergency_available = true;
        db.insert_doctor(&unapproved).unwrap();

        let mut regular = Doctor::new("Dr. Day".into(), "9 AM - 5 PM".into(), vec!["monday".into()]);
        regular.approved = true;
        db.insert_doctor(&regular).unwrap();

        let emergency = db.list_emergency_doctors().unwrap();
        assert_eq!(emergency.len(), 1);
        assert_eq!(emergency[0].id, on_call.id);
    }
}
