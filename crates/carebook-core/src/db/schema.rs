//! SQLite schema definition.

/// Complete database schema for carebook.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Doctors (availability projection + approval gate)
-- ============================================================================

CREATE TABLE IF NOT EXISTS doctors (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    specialization TEXT,
    timings TEXT NOT NULL,                        -- window label, e.g. '11 AM - 4 PM'
    working_days TEXT NOT NULL DEFAULT '[]',      -- JSON array of lowercase weekday tokens
    approved INTEGER NOT NULL DEFAULT 0,
    emergency_available INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_doctors_approved ON doctors(approved);

-- ============================================================================
-- Patients (approval projection)
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    is_approved INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- ============================================================================
-- Appointments
-- ============================================================================

CREATE TABLE IF NOT EXISTS appointments (
    id TEXT PRIMARY KEY,
    patient_id TEXT NOT NULL REFERENCES patients(id),
    doctor_id TEXT NOT NULL REFERENCES doctors(id),
    scheduled_at TEXT NOT NULL,                   -- fixed-width UTC RFC 3339
    day_of_week TEXT NOT NULL,                    -- projection of scheduled_at
    time_label TEXT NOT NULL,                     -- projection of scheduled_at
    status TEXT NOT NULL DEFAULT 'Booked' CHECK (status IN ('Booked', 'Cancelled', 'Completed')),
    notes TEXT,
    follow_up_at TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- The conflict check scans (doctor_id, scheduled_at) ranges
CREATE INDEX IF NOT EXISTS idx_appointments_doctor_time ON appointments(doctor_id, scheduled_at);
CREATE INDEX IF NOT EXISTS idx_appointments_patient ON appointments(patient_id);
CREATE INDEX IF NOT EXISTS idx_appointments_status ON appointments(status);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_schema_valid() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.execute_batch(SCHEMA);
        assert!(result.is_ok(), "Schema should be valid SQL: {:?}", result);
    }

    #[test]
    fn test_status_check_constraint() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        conn.execute(
            "INSERT INTO doctors (id, name, timings) VALUES ('d1', 'Dr. Rao', '9 AM - 5 PM')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO patients (id, name) VALUES ('p1', 'Asha')",
            [],
        )
        .unwrap();

        // Unknown status should be rejected
        let result = conn.execute(
            "INSERT INTO appointments (id, patient_id, doctor_id, scheduled_at, day_of_week, time_label, status)
             VALUES ('a1', 'p1', 'd1', '2026-08-31T10:00:00Z', 'monday', '10:00 AM', 'Pending')",
            [],
        );
        assert!(result.is_err());

        // Valid status should succeed
        let result = conn.execute(
            "INSERT INTO appointments (id, patient_id, doctor_id, scheduled_at, day_of_week, time_label, status)
             VALUES ('a1', 'p1', 'd1', '2026-08-31T10:00:00Z', 'monday', '10:00 AM', 'Booked')",
            [],
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_appointment_requires_known_doctor() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        conn.execute(
            "INSERT INTO patients (id, name) VALUES ('p1', 'Asha')",
            [],
        )
        .unwrap();

        let result = conn.execute(
            "INSERT INTO appointments (id, patient_id, doctor_id, scheduled_at, day_of_week, time_label)
             VALUES ('a1', 'p1', 'nobody', '2026-08-31T10:00:00Z', 'monday', '10:00 AM')",
            [],
        );
        assert!(result.is_err());
    }
}
