//! In-memory append-only audit trail for services and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::ticket::{
    domain::{HistoryEntryId, TicketHistoryEntry, TicketId},
    ports::{TicketHistoryRepository, TicketHistoryRepositoryError, TicketHistoryResult},
};

/// Thread-safe in-memory audit trail.
///
/// Entries are appended per ticket in arrival order, which is the
/// chronological order [`TicketHistoryRepository::list_for_ticket`]
/// promises.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTicketHistoryRepository {
    state: Arc<RwLock<InMemoryHistoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryHistoryState {
    entries: HashMap<TicketId, Vec<TicketHistoryEntry>>,
}

impl InMemoryTicketHistoryRepository {
    /// Creates an empty in-memory audit trail.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn contains_entry(entries: &[TicketHistoryEntry], id: HistoryEntryId) -> bool {
    entries.iter().any(|entry| entry.id() == id)
}

#[async_trait]
impl TicketHistoryRepository for InMemoryTicketHistoryRepository {
    async fn append(&self, entry: &TicketHistoryEntry) -> TicketHistoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TicketHistoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let entries = state.entries.entry(entry.ticket_id()).or_default();
        if contains_entry(entries, entry.id()) {
            return Err(TicketHistoryRepositoryError::DuplicateEntry(
                entry.ticket_id(),
            ));
        }

        entries.push(entry.clone());
        Ok(())
    }

    async fn list_for_ticket(
        &self,
        ticket_id: TicketId,
    ) -> TicketHistoryResult<Vec<TicketHistoryEntry>> {
        let state = self.state.read().map_err(|err| {
            TicketHistoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.entries.get(&ticket_id).cloned().unwrap_or_default())
    }
}
