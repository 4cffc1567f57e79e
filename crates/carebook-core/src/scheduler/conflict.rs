//! Collision detection against booked appointments.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::db::{Database, DbResult};

/// Minutes on either side of a candidate moment within which an
/// existing booked appointment for the same doctor collides. The band
/// is inclusive: a booked record exactly 5 minutes away conflicts.
pub const TOLERANCE_MINUTES: i64 = 5;

/// Checks a candidate slot against the repository's booked records.
pub struct ConflictDetector<'a> {
    db: &'a Database,
    tolerance: Duration,
}

impl<'a> ConflictDetector<'a> {
    /// Create a detector with the default ±5-minute tolerance.
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            tolerance: Duration::minutes(TOLERANCE_MINUTES),
        }
    }

    /// Whether any booked appointment for `doctor_id` lies within the
    /// tolerance band around `moment_at`. `exclude` drops the
    /// appointment being rescheduled from its own check. Cancelled
    /// records never block; the first qualifying record decides.
    pub fn has_conflict(
        &self,
        doctor_id: &str,
        moment_at: DateTime<Utc>,
        exclude: Option<&str>,
    ) -> DbResult<bool> {
        let from = moment_at - self.tolerance;
        let to = moment_at + self.tolerance;

        debug!(
            "Checking collision window for doctor {} around {}",
            doctor_id, moment_at
        );

        let hits = self.db.list_booked_between(doctor_id, from, to, exclude)?;
        if let Some(hit) = hits.first() {
            warn!(
                "Conflict for doctor {}: appointment {} at {} is within tolerance of {}",
                doctor_id, hit.id, hit.scheduled_at, moment_at
            );
            return Ok(true);
        }
        Ok(false)
    }
}
