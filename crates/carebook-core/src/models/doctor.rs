//! Doctor availability projection.

use serde::{Deserialize, Serialize};

/// The slice of a doctor's profile the scheduling core consumes:
/// approval gate, working days, and the daily window label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    /// Unique UUID
    pub id: String,
    /// Display name
    pub name: String,
    /// Medical specialization
    pub specialization: Option<String>,
    /// Daily window label, e.g. "11 AM - 4 PM"
    pub timings: String,
    /// Lowercase weekday tokens the doctor works
    pub working_days: Vec<String>,
    /// Administrative approval gate; unapproved doctors accept no bookings
    pub approved: bool,
    /// Listed by the emergency-doctors query
    pub emergency_available: bool,
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub updated_at: String,
}

impl Doctor {
    /// Create a new, not-yet-approved doctor.
    pub fn new(name: String, timings: String, working_days: Vec<String>) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            specialization: None,
            timings,
            working_days,
            approved: false,
            emergency_available: false,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Whether `day` (a lowercase weekday token) is a working day.
    pub fn works_on(&self, day: &str) -> bool {
        self.working_days.iter().any(|d| d == day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_doctor_starts_unapproved() {
        let doctor = Doctor::new(
            "Dr. Rao".into(),
            "9 AM - 5 PM".into(),
            vec!["monday".into(), "wednesday".into()],
        );
        assert!(!doctor.approved);
        assert!(!doctor.emergency_available);
        assert_eq!(doctor.id.len(), 36);
    }

    #[test]
    fn test_works_on() {
        let doctor = Doctor::new(
            "Dr. Rao".into(),
            "9 AM - 5 PM".into(),
            vec!["monday".into(), "wednesday".into()],
        );
        assert!(doctor.works_on("monday"));
        assert!(doctor.works_on("wednesday"));
        assert!(!doctor.works_on("tuesday"));
        assert!(!doctor.works_on("Monday")); // tokens are lowercase
    }
}
