//! Immutable audit history entries attached to tickets.

use super::{Actor, HistoryEntryId, TicketId, TicketStatus};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// One immutable record of a ticket-affecting change.
///
/// Entries carry the ticket's status at recording time, a human-readable
/// description of the change, and the actor who caused it. There is no way
/// to modify an entry after construction; the audit trail port likewise
/// exposes no update or delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketHistoryEntry {
    id: HistoryEntryId,
    ticket_id: TicketId,
    status: TicketStatus,
    description: String,
    actor: Actor,
    recorded_at: DateTime<Utc>,
}

impl TicketHistoryEntry {
    /// Records a new history entry at the current clock time.
    #[must_use]
    pub fn new(
        ticket_id: TicketId,
        status: TicketStatus,
        description: impl Into<String>,
        actor: Actor,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: HistoryEntryId::new(),
            ticket_id,
            status,
            description: description.into(),
            actor,
            recorded_at: clock.utc(),
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> HistoryEntryId {
        self.id
    }

    /// Returns the ticket this entry belongs to.
    #[must_use]
    pub const fn ticket_id(&self) -> TicketId {
        self.ticket_id
    }

    /// Returns the ticket status at recording time.
    #[must_use]
    pub const fn status(&self) -> TicketStatus {
        self.status
    }

    /// Returns the change description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the actor who caused the change.
    #[must_use]
    pub const fn actor(&self) -> &Actor {
        &self.actor
    }

    /// Returns the recording timestamp.
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
