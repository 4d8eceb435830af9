//! Repository port for appointment persistence with atomic slot exclusion.

use crate::appointment::domain::{Appointment, AppointmentId};
use crate::technician::domain::TechnicianId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for appointment repository operations.
pub type AppointmentRepositoryResult<T> = Result<T, AppointmentRepositoryError>;

/// Appointment persistence contract.
///
/// The insert operation doubles as the conflict guard: implementations
/// must make the overlap check and the insert one atomic step, so two
/// concurrent bookings of overlapping slots for the same technician can
/// never both succeed.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Stores a new appointment if no schedule-blocking appointment of the
    /// same technician overlaps its slot.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentRepositoryError::SlotTaken`] when an overlap
    /// exists and [`AppointmentRepositoryError::DuplicateAppointment`] when
    /// the appointment ID already exists. Nothing is stored on failure.
    async fn insert_if_slot_free(
        &self,
        appointment: &Appointment,
    ) -> AppointmentRepositoryResult<()>;

    /// Persists changes to an existing appointment, but only while the
    /// stored record still equals `expected`.
    ///
    /// The comparison and the write must be one atomic step, so a status
    /// change validated against `expected` can never land on top of a state
    /// some concurrent writer produced in the meantime. Callers reload and
    /// revalidate when the swap is refused.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentRepositoryError::NotFound`] when the
    /// appointment does not exist and
    /// [`AppointmentRepositoryError::ConcurrentModification`] when the
    /// stored record no longer matches `expected`. Nothing is written on
    /// failure.
    async fn update_if_unchanged(
        &self,
        expected: &Appointment,
        updated: &Appointment,
    ) -> AppointmentRepositoryResult<()>;

    /// Finds an appointment by identifier.
    ///
    /// Returns `None` when the appointment does not exist.
    async fn find_by_id(
        &self,
        id: AppointmentId,
    ) -> AppointmentRepositoryResult<Option<Appointment>>;

    /// Returns the technician's schedule-blocking appointments overlapping
    /// the half-open window `[start, end)`.
    ///
    /// The window is any ordered pair of instants; it is not required to be
    /// a bookable slot. Cancelled and no-show appointments never appear in
    /// the result.
    async fn find_blocking_overlaps(
        &self,
        technician_id: TechnicianId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppointmentRepositoryResult<Vec<Appointment>>;
}

/// Errors returned by appointment repository implementations.
#[derive(Debug, Clone, Error)]
pub enum AppointmentRepositoryError {
    /// An appointment with the same identifier already exists.
    #[error("duplicate appointment identifier: {0}")]
    DuplicateAppointment(AppointmentId),

    /// The slot overlaps an existing schedule-blocking appointment.
    #[error("technician {technician_id} already has appointment {conflicting} in that slot")]
    SlotTaken {
        /// Technician whose calendar is occupied.
        technician_id: TechnicianId,
        /// The appointment occupying the slot.
        conflicting: AppointmentId,
    },

    /// The appointment was not found.
    #[error("appointment not found: {0}")]
    NotFound(AppointmentId),

    /// The stored appointment changed between the caller's read and its
    /// write.
    #[error("appointment {0} was modified concurrently")]
    ConcurrentModification(AppointmentId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl AppointmentRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
