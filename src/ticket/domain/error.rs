//! Error types for ticket domain validation and parsing.

use super::{TicketId, TicketStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating ticket aggregates.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TicketDomainError {
    /// The problem description is empty after trimming.
    #[error("ticket description must not be empty")]
    EmptyDescription,

    /// The ticket is closed and no longer accepts changes.
    #[error("ticket {0} is closed")]
    TicketClosed(TicketId),

    /// The requested status change is not in the transition table.
    #[error("ticket {ticket_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// Ticket whose status change was rejected.
        ticket_id: TicketId,
        /// Status at decision time.
        from: TicketStatus,
        /// Requested status.
        to: TicketStatus,
    },

    /// Unassignment was requested while no technician is assigned.
    #[error("ticket {0} has no assigned technician")]
    NoAssignedTechnician(TicketId),
}

/// Error returned while parsing ticket statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown ticket status: {0}")]
pub struct ParseTicketStatusError(pub String);
