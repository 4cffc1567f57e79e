//! Doctor weekly availability model.
//!
//! Answers one question: is this moment within this doctor's declared
//! schedule? Failures carry the reason (wrong day vs outside hours) so
//! the caller can surface a precise message.

mod window;

pub use window::*;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::Doctor;
use crate::moment;

/// Why a candidate moment is outside a doctor's availability.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Unavailable {
    #[error("doctor not available on {day}")]
    WrongDay { day: String },

    #[error("doctor available only between {window}")]
    OutsideHours { window: String },

    /// The stored window label failed to parse. Fixing the label is
    /// the doctor-profile layer's job; this check fails closed.
    #[error("doctor timings are misconfigured: {0}")]
    BadWindow(#[from] WindowParseError),
}

/// Check a candidate moment against the doctor's working days and
/// daily window. The weekday comparison uses the fixed lowercase
/// tokens of [`moment::weekday_token`]; the hour comparison keeps the
/// window's end bound inclusive.
pub fn check_availability(doctor: &Doctor, moment_at: DateTime<Utc>) -> Result<(), Unavailable> {
    let day = moment::weekday_token(moment_at);
    if !doctor.works_on(day) {
        return Err(Unavailable::WrongDay { day: day.to_string() });
    }

    let window = TimeWindow::parse(&doctor.timings)?;
    if !window.contains(moment_at) {
        return Err(Unavailable::OutsideHours { window: window.label });
    }
    Ok(())
}

/// Boolean form of [`check_availability`].
pub fn is_within_availability(doctor: &Doctor, moment_at: DateTime<Utc>) -> bool {
    check_availability(doctor, moment_at).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moment::combine;

    fn monday_doctor() -> Doctor {
        Doctor::new(
            "Dr. Rao".into(),
            "11 AM - 4 PM".into(),
            vec!["monday".into()],
        )
    }

    #[test]
    fn test_within_availability() {
        let doctor = monday_doctor();
        // 2026-08-31 is a Monday
        let moment_at = combine("2026-08-31", "11:00").unwrap();
        assert!(is_within_availability(&doctor, moment_at));
    }

    #[test]
    fn test_wrong_day_reason() {
        let doctor = monday_doctor();
        let tuesday = combine("2026-09-01", "11:00").unwrap();
        assert_eq!(
            check_availability(&doctor, tuesday),
            Err(Unavailable::WrongDay {
                day: "tuesday".into()
            })
        );
    }

    #[test]
    fn test_outside_hours_reason() {
        let doctor = monday_doctor();
        let too_late = combine("2026-08-31", "16:01").unwrap();
        assert_eq!(
            check_availability(&doctor, too_late),
            Err(Unavailable::OutsideHours {
                window: "11 AM - 4 PM".into()
            })
        );
    }

    #[test]
    fn test_closing_hour_is_bookable() {
        let doctor = monday_doctor();
        let at_close = combine("2026-08-31", "16:00").unwrap();
        assert!(is_within_availability(&doctor, at_close));
    }

    #[test]
    fn test_no_working_days_never_available() {
        let doctor = Doctor::new("Dr. Idle".into(), "11 AM - 4 PM".into(), vec![]);
        for date in ["2026-08-31", "2026-09-01", "2026-09-02", "2026-09-06"] {
            let moment_at = combine(date, "12:00").unwrap();
            assert!(!is_within_availability(&doctor, moment_at));
        }
    }

    #[test]
    fn test_malformed_label_fails_closed() {
        let doctor = Doctor::new("Dr. Typo".into(), "nine to five".into(), vec!["monday".into()]);
        let moment_at = combine("2026-08-31", "12:00").unwrap();
        assert!(matches!(
            check_availability(&doctor, moment_at),
            Err(Unavailable::BadWindow(_))
        ));
    }
}
