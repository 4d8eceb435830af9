//! Service layer orchestrating the ticket lifecycle and its audit trail.
//!
//! Every mutating operation here follows the same discipline: load a
//! consistent snapshot, validate all preconditions, apply the change, then
//! append exactly one audit entry describing it. Nothing is mutated when a
//! precondition fails.
//!
//! Writes go through the repository's compare-and-swap update. When a
//! concurrent writer lands first, the operation reloads and revalidates
//! against the fresh state, so a transition is never decided on a stale
//! read. Two racing closures of one ticket resolve to one success and one
//! closed-ticket rejection.

use crate::category::ServiceCategory;
use crate::client::{
    domain::{ClientId, ClientStatus},
    ports::{ClientRepository, ClientRepositoryError},
};
use crate::technician::{
    domain::{TechnicianId, TechnicianStatus},
    ports::{TechnicianRepository, TechnicianRepositoryError},
};
use crate::ticket::{
    domain::{Actor, Ticket, TicketDomainError, TicketHistoryEntry, TicketId, TicketStatus},
    ports::{
        TicketHistoryRepository, TicketHistoryRepositoryError, TicketRepository,
        TicketRepositoryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for creating a ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTicketRequest {
    client_id: ClientId,
    category: ServiceCategory,
    description: String,
}

impl CreateTicketRequest {
    /// Creates a request with required ticket fields.
    #[must_use]
    pub fn new(
        client_id: ClientId,
        category: ServiceCategory,
        description: impl Into<String>,
    ) -> Self {
        Self {
            client_id,
            category,
            description: description.into(),
        }
    }
}

/// Service-level errors for ticket lifecycle operations.
#[derive(Debug, Error)]
pub enum TicketLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TicketDomainError),
    /// The referenced client does not exist.
    #[error("client not found: {0}")]
    ClientNotFound(ClientId),
    /// The referenced client exists but may not file tickets.
    #[error("client {client_id} is {status}; tickets require an active client")]
    ClientNotActive {
        /// Client whose request was rejected.
        client_id: ClientId,
        /// Status at decision time.
        status: ClientStatus,
    },
    /// The referenced ticket does not exist.
    #[error("ticket not found: {0}")]
    TicketNotFound(TicketId),
    /// The referenced technician does not exist.
    #[error("technician not found: {0}")]
    TechnicianNotFound(TechnicianId),
    /// The referenced technician exists but may not receive work.
    #[error("technician {technician_id} is {status}; assignments require an active technician")]
    TechnicianNotActive {
        /// Technician whose assignment was rejected.
        technician_id: TechnicianId,
        /// Status at decision time.
        status: TechnicianStatus,
    },
    /// The technician lacks the skill for the ticket's category.
    #[error("technician {technician_id} is not qualified for {category}")]
    TechnicianNotQualified {
        /// Technician whose assignment was rejected.
        technician_id: TechnicianId,
        /// Category the ticket requires.
        category: ServiceCategory,
    },
    /// Ticket repository operation failed.
    #[error(transparent)]
    Tickets(#[from] TicketRepositoryError),
    /// Audit trail operation failed.
    #[error(transparent)]
    History(#[from] TicketHistoryRepositoryError),
    /// Technician repository operation failed.
    #[error(transparent)]
    Technicians(#[from] TechnicianRepositoryError),
    /// Client repository operation failed.
    #[error(transparent)]
    Clients(#[from] ClientRepositoryError),
}

/// Result type for ticket lifecycle operations.
pub type TicketLifecycleResult<T> = Result<T, TicketLifecycleError>;

/// Ticket lifecycle orchestration service.
#[derive(Clone)]
pub struct TicketLifecycleService<T, H, R, L, C>
where
    T: TicketRepository,
    H: TicketHistoryRepository,
    R: TechnicianRepository,
    L: ClientRepository,
    C: Clock + Send + Sync,
{
    tickets: Arc<T>,
    history: Arc<H>,
    technicians: Arc<R>,
    clients: Arc<L>,
    clock: Arc<C>,
}

impl<T, H, R, L, C> TicketLifecycleService<T, H, R, L, C>
where
    T: TicketRepository,
    H: TicketHistoryRepository,
    R: TechnicianRepository,
    L: ClientRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new ticket lifecycle service.
    #[must_use]
    pub const fn new(
        tickets: Arc<T>,
        history: Arc<H>,
        technicians: Arc<R>,
        clients: Arc<L>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tickets,
            history,
            technicians,
            clients,
            clock,
        }
    }

    /// Creates a new open, unassigned ticket for an active client.
    ///
    /// The due timestamp is fixed at creation from the category's
    /// resolution window, and a system-actor audit entry records the
    /// creation.
    ///
    /// # Errors
    ///
    /// Returns [`TicketLifecycleError::ClientNotFound`] or
    /// [`TicketLifecycleError::ClientNotActive`] when the client cannot
    /// file tickets, and a domain error when the description is empty.
    pub async fn create_ticket(
        &self,
        request: CreateTicketRequest,
    ) -> TicketLifecycleResult<Ticket> {
        let client = self
            .clients
            .find_by_id(request.client_id)
            .await?
            .ok_or(TicketLifecycleError::ClientNotFound(request.client_id))?;
        if client.status() != ClientStatus::Active {
            return Err(TicketLifecycleError::ClientNotActive {
                client_id: client.id(),
                status: client.status(),
            });
        }

        let ticket = Ticket::new(
            request.client_id,
            request.category,
            request.description,
            &*self.clock,
        )?;
        self.tickets.insert(&ticket).await?;
        self.record(
            &ticket,
            format!(
                "Ticket created — {} support request",
                ticket.category()
            ),
            Actor::system(),
        )
        .await?;
        info!(ticket_id = %ticket.id(), category = %ticket.category(), "created ticket");
        Ok(ticket)
    }

    /// Assigns (or reassigns) a qualified, active technician to an open
    /// ticket.
    ///
    /// # Errors
    ///
    /// Returns a domain error when the ticket is closed,
    /// [`TicketLifecycleError::TechnicianNotFound`],
    /// [`TicketLifecycleError::TechnicianNotActive`], or
    /// [`TicketLifecycleError::TechnicianNotQualified`] when the technician
    /// cannot take the ticket.
    pub async fn assign_technician(
        &self,
        ticket_id: TicketId,
        technician_id: TechnicianId,
        actor: Actor,
    ) -> TicketLifecycleResult<Ticket> {
        let (ticket, technician) = loop {
            let snapshot = self.load_ticket(ticket_id).await?;
            if snapshot.status() == TicketStatus::Closed {
                return Err(TicketDomainError::TicketClosed(ticket_id).into());
            }

            let technician = self
                .technicians
                .find_by_id(technician_id)
                .await?
                .ok_or(TicketLifecycleError::TechnicianNotFound(technician_id))?;
            if technician.status() != TechnicianStatus::Active {
                return Err(TicketLifecycleError::TechnicianNotActive {
                    technician_id,
                    status: technician.status(),
                });
            }
            if !technician.is_qualified_for(snapshot.category()) {
                warn!(
                    ticket_id = %ticket_id,
                    technician_id = %technician_id,
                    category = %snapshot.category(),
                    "unqualified assignment rejected"
                );
                return Err(TicketLifecycleError::TechnicianNotQualified {
                    technician_id,
                    category: snapshot.category(),
                });
            }

            let mut updated = snapshot.clone();
            updated.assign(technician_id, &*self.clock)?;
            match self.tickets.update_if_unchanged(&snapshot, &updated).await {
                Ok(()) => break (updated, technician),
                Err(TicketRepositoryError::ConcurrentModification(_)) => continue,
                Err(other) => return Err(other.into()),
            }
        };
        self.record(
            &ticket,
            format!("Assigned technician {}", technician.name()),
            actor,
        )
        .await?;
        info!(ticket_id = %ticket_id, technician_id = %technician_id, "assigned technician");
        Ok(ticket)
    }

    /// Clears the current assignment, recording the prior technician and
    /// the reason.
    ///
    /// # Errors
    ///
    /// Returns a domain error when the ticket is closed or has no assigned
    /// technician.
    pub async fn unassign_technician(
        &self,
        ticket_id: TicketId,
        reason: impl Into<String> + Send,
        actor: Actor,
    ) -> TicketLifecycleResult<Ticket> {
        let (ticket, prior) = loop {
            let snapshot = self.load_ticket(ticket_id).await?;
            let mut updated = snapshot.clone();
            let prior = updated.unassign(&*self.clock)?;
            match self.tickets.update_if_unchanged(&snapshot, &updated).await {
                Ok(()) => break (updated, prior),
                Err(TicketRepositoryError::ConcurrentModification(_)) => continue,
                Err(other) => return Err(other.into()),
            }
        };

        let prior_name = self
            .technicians
            .find_by_id(prior)
            .await?
            .map_or_else(|| prior.to_string(), |technician| technician.name().to_owned());
        self.record(
            &ticket,
            format!("Unassigned technician {}: {}", prior_name, reason.into()),
            actor,
        )
        .await?;
        info!(ticket_id = %ticket_id, technician_id = %prior, "unassigned technician");
        Ok(ticket)
    }

    /// Applies a validated status change and records it with the reason.
    ///
    /// The ticket status machine only admits open-to-closed and the
    /// idempotent open-to-open no-op.
    ///
    /// # Errors
    ///
    /// Returns a domain error when the ticket is closed or the transition
    /// is denied.
    pub async fn update_status(
        &self,
        ticket_id: TicketId,
        new_status: TicketStatus,
        reason: impl Into<String> + Send,
        actor: Actor,
    ) -> TicketLifecycleResult<Ticket> {
        let (ticket, from) = loop {
            let snapshot = self.load_ticket(ticket_id).await?;
            let from = snapshot.status();
            let mut updated = snapshot.clone();
            updated.transition_to(new_status, &*self.clock)?;
            match self.tickets.update_if_unchanged(&snapshot, &updated).await {
                Ok(()) => break (updated, from),
                Err(TicketRepositoryError::ConcurrentModification(_)) => continue,
                Err(other) => return Err(other.into()),
            }
        };
        self.record(
            &ticket,
            format!("Status changed from {from} to {new_status}: {}", reason.into()),
            actor,
        )
        .await?;
        Ok(ticket)
    }

    /// Closes an open ticket, embedding the resolution notes in the audit
    /// entry.
    ///
    /// # Errors
    ///
    /// Returns a domain error when the ticket is already closed.
    pub async fn close_ticket(
        &self,
        ticket_id: TicketId,
        resolution_notes: impl Into<String> + Send,
        closed_by: Actor,
    ) -> TicketLifecycleResult<Ticket> {
        let ticket = loop {
            let snapshot = self.load_ticket(ticket_id).await?;
            let mut updated = snapshot.clone();
            updated.close(&*self.clock)?;
            match self.tickets.update_if_unchanged(&snapshot, &updated).await {
                Ok(()) => break updated,
                Err(TicketRepositoryError::ConcurrentModification(_)) => continue,
                Err(other) => return Err(other.into()),
            }
        };
        self.record(
            &ticket,
            format!("Ticket closed: {}", resolution_notes.into()),
            closed_by,
        )
        .await?;
        info!(ticket_id = %ticket_id, "closed ticket");
        Ok(ticket)
    }

    /// Retrieves a ticket by identifier.
    ///
    /// Returns `Ok(None)` when no ticket matches.
    ///
    /// # Errors
    ///
    /// Returns [`TicketLifecycleError::Tickets`] when the lookup fails.
    pub async fn find_by_id(&self, id: TicketId) -> TicketLifecycleResult<Option<Ticket>> {
        Ok(self.tickets.find_by_id(id).await?)
    }

    /// Returns a ticket's audit trail in chronological order.
    ///
    /// # Errors
    ///
    /// Returns [`TicketLifecycleError::History`] when the lookup fails.
    pub async fn history(
        &self,
        ticket_id: TicketId,
    ) -> TicketLifecycleResult<Vec<TicketHistoryEntry>> {
        Ok(self.history.list_for_ticket(ticket_id).await?)
    }

    async fn load_ticket(&self, ticket_id: TicketId) -> TicketLifecycleResult<Ticket> {
        self.tickets
            .find_by_id(ticket_id)
            .await?
            .ok_or(TicketLifecycleError::TicketNotFound(ticket_id))
    }

    /// Appends the single audit entry a logical change produces.
    async fn record(
        &self,
        ticket: &Ticket,
        description: String,
        actor: Actor,
    ) -> TicketLifecycleResult<()> {
        let entry = TicketHistoryEntry::new(
            ticket.id(),
            ticket.status(),
            description,
            actor,
            &*self.clock,
        );
        self.history.append(&entry).await?;
        Ok(())
    }
}
