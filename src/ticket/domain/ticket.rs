//! Ticket aggregate root and status lifecycle.

use super::{ParseTicketStatusError, TicketDomainError, TicketId};
use crate::category::ServiceCategory;
use crate::client::domain::ClientId;
use crate::technician::domain::TechnicianId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ticket lifecycle status.
///
/// The enum is deliberately two-valued: a ticket is either being worked or
/// it is done. The only non-trivial transition is open to closed; closed is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Work outstanding; assignment changes are permitted.
    Open,
    /// Resolved; no further changes are permitted.
    Closed,
}

impl TicketStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    /// Returns whether no further transitions are permitted from this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Returns whether transition to `target` is allowed.
    ///
    /// Open tickets may stay open (idempotent no-op) or close; closed
    /// tickets accept nothing.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!((self, target), (Self::Open, Self::Open | Self::Closed))
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TicketStatus {
    type Error = ParseTicketStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            _ => Err(ParseTicketStatusError(value.to_owned())),
        }
    }
}

/// Ticket aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    id: TicketId,
    client_id: ClientId,
    category: ServiceCategory,
    description: String,
    status: TicketStatus,
    assigned_technician: Option<TechnicianId>,
    due_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted ticket aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTicketData {
    /// Persisted ticket identifier.
    pub id: TicketId,
    /// Persisted owning client.
    pub client_id: ClientId,
    /// Persisted service category.
    pub category: ServiceCategory,
    /// Persisted problem description.
    pub description: String,
    /// Persisted lifecycle status.
    pub status: TicketStatus,
    /// Persisted technician assignment, if any.
    pub assigned_technician: Option<TechnicianId>,
    /// Persisted SLA due timestamp.
    pub due_at: DateTime<Utc>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Creates a new open, unassigned ticket.
    ///
    /// The due timestamp is fixed here, exactly once, as the creation
    /// timestamp plus the category's resolution window.
    ///
    /// # Errors
    ///
    /// Returns [`TicketDomainError::EmptyDescription`] when the description
    /// is empty after trimming.
    pub fn new(
        client_id: ClientId,
        category: ServiceCategory,
        description: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<Self, TicketDomainError> {
        let description = description.into();
        if description.trim().is_empty() {
            return Err(TicketDomainError::EmptyDescription);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: TicketId::new(),
            client_id,
            category,
            description,
            status: TicketStatus::Open,
            assigned_technician: None,
            due_at: timestamp + category.resolution_window(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a ticket from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTicketData) -> Self {
        Self {
            id: data.id,
            client_id: data.client_id,
            category: data.category,
            description: data.description,
            status: data.status,
            assigned_technician: data.assigned_technician,
            due_at: data.due_at,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the ticket identifier.
    #[must_use]
    pub const fn id(&self) -> TicketId {
        self.id
    }

    /// Returns the owning client.
    #[must_use]
    pub const fn client_id(&self) -> ClientId {
        self.client_id
    }

    /// Returns the service category.
    #[must_use]
    pub const fn category(&self) -> ServiceCategory {
        self.category
    }

    /// Returns the problem description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TicketStatus {
        self.status
    }

    /// Returns the assigned technician, if any.
    #[must_use]
    pub const fn assigned_technician(&self) -> Option<TechnicianId> {
        self.assigned_technician
    }

    /// Returns the SLA due timestamp.
    #[must_use]
    pub const fn due_at(&self) -> DateTime<Utc> {
        self.due_at
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Assigns (or reassigns) a technician while the ticket is open.
    ///
    /// Qualification and employment-status checks belong to the lifecycle
    /// service; the aggregate only guards its own lifecycle.
    ///
    /// # Errors
    ///
    /// Returns [`TicketDomainError::TicketClosed`] when the ticket is
    /// closed.
    pub fn assign(
        &mut self,
        technician_id: TechnicianId,
        clock: &impl Clock,
    ) -> Result<(), TicketDomainError> {
        if self.status == TicketStatus::Closed {
            return Err(TicketDomainError::TicketClosed(self.id));
        }

        self.assigned_technician = Some(technician_id);
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Clears the current assignment and returns the prior technician.
    ///
    /// # Errors
    ///
    /// Returns [`TicketDomainError::TicketClosed`] when the ticket is
    /// closed, or [`TicketDomainError::NoAssignedTechnician`] when no
    /// technician is assigned.
    pub fn unassign(&mut self, clock: &impl Clock) -> Result<TechnicianId, TicketDomainError> {
        if self.status == TicketStatus::Closed {
            return Err(TicketDomainError::TicketClosed(self.id));
        }

        let prior = self
            .assigned_technician
            .take()
            .ok_or(TicketDomainError::NoAssignedTechnician(self.id))?;
        self.updated_at = clock.utc();
        Ok(prior)
    }

    /// Moves the ticket to `target` after consulting the transition table.
    ///
    /// # Errors
    ///
    /// Returns [`TicketDomainError::TicketClosed`] when the ticket is
    /// already closed, and [`TicketDomainError::InvalidStatusTransition`]
    /// for any other denied change; the aggregate is left untouched.
    pub fn transition_to(
        &mut self,
        target: TicketStatus,
        clock: &impl Clock,
    ) -> Result<(), TicketDomainError> {
        if self.status == TicketStatus::Closed {
            return Err(TicketDomainError::TicketClosed(self.id));
        }
        if !self.status.can_transition_to(target) {
            return Err(TicketDomainError::InvalidStatusTransition {
                ticket_id: self.id,
                from: self.status,
                to: target,
            });
        }

        self.status = target;
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Closes the ticket.
    ///
    /// # Errors
    ///
    /// Returns [`TicketDomainError::TicketClosed`] when the ticket is
    /// already closed.
    pub fn close(&mut self, clock: &impl Clock) -> Result<(), TicketDomainError> {
        self.transition_to(TicketStatus::Closed, clock)
    }
}
