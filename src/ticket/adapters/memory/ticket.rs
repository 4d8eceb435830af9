//! In-memory ticket repository for services and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::technician::domain::TechnicianId;
use crate::technician::ports::{OpenTicketCounter, WorkloadQueryError, WorkloadQueryResult};
use crate::ticket::{
    domain::{Ticket, TicketId, TicketStatus},
    ports::{TicketRepository, TicketRepositoryError, TicketRepositoryResult},
};

/// Thread-safe in-memory ticket repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTicketRepository {
    state: Arc<RwLock<InMemoryTicketState>>,
}

#[derive(Debug, Default)]
struct InMemoryTicketState {
    tickets: HashMap<TicketId, Ticket>,
}

impl InMemoryTicketRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TicketRepository for InMemoryTicketRepository {
    async fn insert(&self, ticket: &Ticket) -> TicketRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TicketRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.tickets.contains_key(&ticket.id()) {
            return Err(TicketRepositoryError::DuplicateTicket(ticket.id()));
        }

        state.tickets.insert(ticket.id(), ticket.clone());
        Ok(())
    }

    async fn update_if_unchanged(
        &self,
        expected: &Ticket,
        updated: &Ticket,
    ) -> TicketRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TicketRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let stored = state
            .tickets
            .get(&updated.id())
            .ok_or(TicketRepositoryError::NotFound(updated.id()))?;
        if stored != expected {
            return Err(TicketRepositoryError::ConcurrentModification(updated.id()));
        }

        state.tickets.insert(updated.id(), updated.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TicketId) -> TicketRepositoryResult<Option<Ticket>> {
        let state = self.state.read().map_err(|err| {
            TicketRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.tickets.get(&id).cloned())
    }

    async fn count_open_for_technician(
        &self,
        technician_id: TechnicianId,
    ) -> TicketRepositoryResult<u64> {
        let state = self.state.read().map_err(|err| {
            TicketRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let count = state
            .tickets
            .values()
            .filter(|ticket| {
                ticket.status() == TicketStatus::Open
                    && ticket.assigned_technician() == Some(technician_id)
            })
            .count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }
}

#[async_trait]
impl OpenTicketCounter for InMemoryTicketRepository {
    async fn open_ticket_count(&self, technician_id: TechnicianId) -> WorkloadQueryResult<u64> {
        self.count_open_for_technician(technician_id)
            .await
            .map_err(WorkloadQueryError::persistence)
    }
}
