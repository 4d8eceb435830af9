//! Error types for client domain validation and parsing.

use super::{ClientId, ClientStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating client aggregates.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientDomainError {
    /// The display name is empty after trimming.
    #[error("client name must not be empty")]
    EmptyName,

    /// The requested status change is not in the transition table.
    #[error("client {client_id} cannot move from {from} to {to}")]
    InvalidStatusTransition {
        /// Client whose status change was rejected.
        client_id: ClientId,
        /// Status at decision time.
        from: ClientStatus,
        /// Requested status.
        to: ClientStatus,
    },
}

/// Error returned while parsing client statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown client status: {0}")]
pub struct ParseClientStatusError(pub String);
