//! Error types for appointment domain validation and parsing.

use super::{AppointmentId, AppointmentStatus};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or mutating appointment aggregates.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AppointmentDomainError {
    /// The interval end does not lie strictly after its start.
    #[error("appointment end {end} must be after start {start}")]
    EndNotAfterStart {
        /// Requested interval start.
        start: DateTime<Utc>,
        /// Requested interval end.
        end: DateTime<Utc>,
    },

    /// The interval is shorter than the minimum booking length.
    #[error("appointment of {minutes} minutes is shorter than the 30 minute minimum")]
    DurationTooShort {
        /// Requested duration in minutes.
        minutes: i64,
    },

    /// The interval is longer than the maximum booking length.
    #[error("appointment of {minutes} minutes exceeds the 480 minute maximum")]
    DurationTooLong {
        /// Requested duration in minutes.
        minutes: i64,
    },

    /// The interval starts before the current time.
    #[error("appointment start {start} is in the past (now {now})")]
    StartInPast {
        /// Requested interval start.
        start: DateTime<Utc>,
        /// Clock reading at decision time.
        now: DateTime<Utc>,
    },

    /// The requested status change is not in the transition table.
    #[error("appointment {appointment_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// Appointment whose status change was rejected.
        appointment_id: AppointmentId,
        /// Status at decision time.
        from: AppointmentStatus,
        /// Requested status.
        to: AppointmentStatus,
    },

    /// Cancellation was requested for a completed appointment.
    #[error("appointment {0} is completed and cannot be cancelled")]
    CannotCancelCompleted(AppointmentId),

    /// Cancellation was requested for an already-cancelled appointment.
    #[error("appointment {0} is already cancelled")]
    AlreadyCancelled(AppointmentId),
}

/// Error returned while parsing appointment statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown appointment status: {0}")]
pub struct ParseAppointmentStatusError(pub String);
