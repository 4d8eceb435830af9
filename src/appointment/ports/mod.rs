//! Port contracts for appointment scheduling.

pub mod repository;

pub use repository::{
    AppointmentRepository, AppointmentRepositoryError, AppointmentRepositoryResult,
};
