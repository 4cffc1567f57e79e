//! Carebook Core Library
//!
//! Appointment scheduling core for a patient/doctor/admin clinic
//! system: booking, rescheduling, cancellation, doctor-availability
//! validation, and collision detection over a SQLite-backed
//! appointment repository. Consumed in-process by an HTTP-facing
//! request layer; no transport or UI concerns live here.
//!
//! # Architecture
//!
//! ```text
//! Booking / reschedule request
//!             │
//!             ▼
//!     Scheduling Engine ───► Doctor / Patient directories
//!             │                  (approval gates)
//!             ├───► Availability Model   (working days + daily window)
//!             ├───► Conflict Detector    (±5 min band, Booked only)
//!             ▼
//!     Appointment Repository  (create / update / range queries)
//! ```
//!
//! # Modules
//!
//! - [`db`]: SQLite repository and directory layer
//! - [`models`]: Domain types (Appointment, Doctor, Patient)
//! - [`availability`]: Weekly availability model and window parser
//! - [`scheduler`]: Scheduling engine and conflict detector
//! - [`moment`]: Date+time combination and derived projections

pub mod availability;
pub mod db;
pub mod models;
pub mod moment;
pub mod scheduler;

// Re-export commonly used types
pub use availability::{
    check_availability, is_within_availability, TimeWindow, Unavailable, WindowParseError,
};
pub use db::Database;
pub use models::{Appointment, AppointmentStatus, Doctor, Patient};
pub use scheduler::{
    BookingRequest, ConflictDetector, SchedResult, Scheduler, SchedulingError, TOLERANCE_MINUTES,
};
