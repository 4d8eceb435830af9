//! In-memory client repository for services and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::client::{
    domain::{Client, ClientId},
    ports::{ClientRepository, ClientRepositoryError, ClientRepositoryResult},
};
use crate::contact::EmailAddress;

/// Thread-safe in-memory client repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryClientRepository {
    state: Arc<RwLock<InMemoryClientState>>,
}

#[derive(Debug, Default)]
struct InMemoryClientState {
    clients: HashMap<ClientId, Client>,
    email_index: HashMap<EmailAddress, ClientId>,
}

impl InMemoryClientRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientRepository for InMemoryClientRepository {
    async fn insert(&self, client: &Client) -> ClientRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ClientRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.clients.contains_key(&client.id()) {
            return Err(ClientRepositoryError::DuplicateClient(client.id()));
        }
        if state.email_index.contains_key(client.email()) {
            return Err(ClientRepositoryError::DuplicateEmail(client.email().clone()));
        }

        state.email_index.insert(client.email().clone(), client.id());
        state.clients.insert(client.id(), client.clone());
        Ok(())
    }

    async fn update_if_unchanged(
        &self,
        expected: &Client,
        updated: &Client,
    ) -> ClientRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ClientRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let stored = state
            .clients
            .get(&updated.id())
            .ok_or(ClientRepositoryError::NotFound(updated.id()))?;
        if stored != expected {
            return Err(ClientRepositoryError::ConcurrentModification(updated.id()));
        }

        state.clients.insert(updated.id(), updated.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ClientId) -> ClientRepositoryResult<Option<Client>> {
        let state = self.state.read().map_err(|err| {
            ClientRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.clients.get(&id).cloned())
    }

    async fn delete(&self, id: ClientId) -> ClientRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ClientRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let removed = state
            .clients
            .remove(&id)
            .ok_or(ClientRepositoryError::NotFound(id))?;
        state.email_index.remove(removed.email());
        Ok(())
    }
}
