//! Append-only port for the ticket audit trail.
//!
//! The interface exposes exactly two operations: append a new entry and
//! list a ticket's entries in chronological order. Immutability of recorded
//! entries is a property of this signature, not a convention adapters are
//! trusted to uphold.

use crate::ticket::domain::{TicketHistoryEntry, TicketId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for audit trail operations.
pub type TicketHistoryResult<T> = Result<T, TicketHistoryRepositoryError>;

/// Append-only audit trail contract.
#[async_trait]
pub trait TicketHistoryRepository: Send + Sync {
    /// Appends a new immutable history entry.
    ///
    /// # Errors
    ///
    /// Returns [`TicketHistoryRepositoryError::DuplicateEntry`] when the
    /// entry ID already exists.
    async fn append(&self, entry: &TicketHistoryEntry) -> TicketHistoryResult<()>;

    /// Returns a ticket's history entries in chronological (append) order.
    async fn list_for_ticket(
        &self,
        ticket_id: TicketId,
    ) -> TicketHistoryResult<Vec<TicketHistoryEntry>>;
}

/// Errors returned by audit trail implementations.
#[derive(Debug, Clone, Error)]
pub enum TicketHistoryRepositoryError {
    /// An entry with the same identifier already exists.
    #[error("duplicate history entry for ticket {0}")]
    DuplicateEntry(TicketId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TicketHistoryRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
