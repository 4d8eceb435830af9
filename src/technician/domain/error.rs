//! Error types for technician domain validation and parsing.

use super::{TechnicianId, TechnicianStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating technician aggregates.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TechnicianDomainError {
    /// The display name is empty after trimming.
    #[error("technician name must not be empty")]
    EmptyName,

    /// The requested status change is not in the transition table.
    #[error("technician {technician_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// Technician whose status change was rejected.
        technician_id: TechnicianId,
        /// Status at decision time.
        from: TechnicianStatus,
        /// Requested status.
        to: TechnicianStatus,
    },
}

/// Error returned while parsing technician statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown technician status: {0}")]
pub struct ParseTechnicianStatusError(pub String);
