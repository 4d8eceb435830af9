//! Domain model for appointment scheduling.

mod appointment;
mod error;
mod slot;

pub use appointment::{
    Appointment, AppointmentId, AppointmentStatus, PersistedAppointmentData,
};
pub use error::{AppointmentDomainError, ParseAppointmentStatusError};
pub use slot::TimeSlot;
