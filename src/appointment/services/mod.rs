//! Orchestration services for appointment scheduling.

pub mod scheduling;

pub use scheduling::{
    AppointmentSchedulingService, ScheduleAppointmentRequest, SchedulingError, SchedulingResult,
};
