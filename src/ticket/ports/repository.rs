//! Repository port for ticket persistence, lookup, and workload counts.

use crate::technician::domain::TechnicianId;
use crate::ticket::domain::{Ticket, TicketId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for ticket repository operations.
pub type TicketRepositoryResult<T> = Result<T, TicketRepositoryError>;

/// Ticket persistence contract.
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Stores a new ticket.
    ///
    /// # Errors
    ///
    /// Returns [`TicketRepositoryError::DuplicateTicket`] when the ticket ID
    /// already exists.
    async fn insert(&self, ticket: &Ticket) -> TicketRepositoryResult<()>;

    /// Persists changes to an existing ticket, but only while the stored
    /// record still equals `expected`.
    ///
    /// The comparison and the write must be one atomic step, so a change
    /// validated against `expected` can never land on top of a state some
    /// concurrent writer produced in the meantime. Callers reload and
    /// revalidate when the swap is refused.
    ///
    /// # Errors
    ///
    /// Returns [`TicketRepositoryError::NotFound`] when the ticket does not
    /// exist and [`TicketRepositoryError::ConcurrentModification`] when the
    /// stored record no longer matches `expected`. Nothing is written on
    /// failure.
    async fn update_if_unchanged(
        &self,
        expected: &Ticket,
        updated: &Ticket,
    ) -> TicketRepositoryResult<()>;

    /// Finds a ticket by identifier.
    ///
    /// Returns `None` when the ticket does not exist.
    async fn find_by_id(&self, id: TicketId) -> TicketRepositoryResult<Option<Ticket>>;

    /// Counts open tickets currently assigned to `technician_id`.
    ///
    /// This is the explicit workload query behind "current load"; the
    /// assignment selector calls it per candidate on every pool scan.
    async fn count_open_for_technician(
        &self,
        technician_id: TechnicianId,
    ) -> TicketRepositoryResult<u64>;
}

/// Errors returned by ticket repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TicketRepositoryError {
    /// A ticket with the same identifier already exists.
    #[error("duplicate ticket identifier: {0}")]
    DuplicateTicket(TicketId),

    /// The ticket was not found.
    #[error("ticket not found: {0}")]
    NotFound(TicketId),

    /// The stored ticket changed between the caller's read and its write.
    #[error("ticket {0} was modified concurrently")]
    ConcurrentModification(TicketId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TicketRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
