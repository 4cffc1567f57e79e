//! Domain models for the carebook scheduling core.

mod appointment;
mod doctor;
mod patient;

pub use appointment::*;
pub use doctor::*;
pub use patient::*;
