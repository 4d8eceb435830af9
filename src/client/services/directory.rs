//! Directory service for registering clients and applying status changes.

use crate::client::{
    domain::{Client, ClientDomainError, ClientId, ClientStatus},
    ports::{ClientRepository, ClientRepositoryError},
};
use crate::contact::{EmailAddress, InvalidEmailAddress};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Service-level errors for client directory operations.
#[derive(Debug, Error)]
pub enum ClientDirectoryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ClientDomainError),
    /// The supplied email address is malformed.
    #[error(transparent)]
    InvalidEmail(#[from] InvalidEmailAddress),
    /// The referenced client does not exist.
    #[error("client not found: {0}")]
    NotFound(ClientId),
    /// Removal was requested while the account is still active.
    #[error("client {0} is active and cannot be removed")]
    StillActive(ClientId),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ClientRepositoryError),
}

/// Result type for client directory operations.
pub type ClientDirectoryResult<T> = Result<T, ClientDirectoryError>;

/// Client directory orchestration service.
#[derive(Clone)]
pub struct ClientDirectoryService<R, C>
where
    R: ClientRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> ClientDirectoryService<R, C>
where
    R: ClientRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new client directory service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a new active client account.
    ///
    /// # Errors
    ///
    /// Returns [`ClientDirectoryError`] when the name or email fails
    /// validation or the email is already registered.
    pub async fn register(
        &self,
        name: impl Into<String> + Send,
        email: impl Into<String> + Send,
    ) -> ClientDirectoryResult<Client> {
        let email = EmailAddress::new(email)?;
        let client = Client::new(name, email, &*self.clock)?;
        self.repository.insert(&client).await?;
        info!(client_id = %client.id(), "registered client");
        Ok(client)
    }

    /// Moves a client to `target` after consulting the transition table.
    ///
    /// # Errors
    ///
    /// Returns [`ClientDirectoryError::NotFound`] when the client does not
    /// exist, or a domain error when the transition is denied.
    pub async fn set_status(
        &self,
        id: ClientId,
        target: ClientStatus,
    ) -> ClientDirectoryResult<Client> {
        loop {
            let snapshot = self
                .repository
                .find_by_id(id)
                .await?
                .ok_or(ClientDirectoryError::NotFound(id))?;
            let mut updated = snapshot.clone();
            updated.transition_to(target, &*self.clock)?;
            match self
                .repository
                .update_if_unchanged(&snapshot, &updated)
                .await
            {
                Ok(()) => return Ok(updated),
                Err(ClientRepositoryError::ConcurrentModification(_)) => continue,
                Err(other) => return Err(other.into()),
            }
        }
    }

    /// Reactivates a client account.
    ///
    /// # Errors
    ///
    /// See [`Self::set_status`].
    pub async fn activate(&self, id: ClientId) -> ClientDirectoryResult<Client> {
        self.set_status(id, ClientStatus::Active).await
    }

    /// Deactivates a client account.
    ///
    /// # Errors
    ///
    /// See [`Self::set_status`].
    pub async fn deactivate(&self, id: ClientId) -> ClientDirectoryResult<Client> {
        self.set_status(id, ClientStatus::Inactive).await
    }

    /// Suspends a client account pending review.
    ///
    /// # Errors
    ///
    /// See [`Self::set_status`].
    pub async fn suspend(&self, id: ClientId) -> ClientDirectoryResult<Client> {
        self.set_status(id, ClientStatus::Suspended).await
    }

    /// Removes a client record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientDirectoryError::StillActive`] when the account has
    /// not been deactivated or suspended first, and
    /// [`ClientDirectoryError::NotFound`] when it does not exist.
    pub async fn remove(&self, id: ClientId) -> ClientDirectoryResult<()> {
        let client = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ClientDirectoryError::NotFound(id))?;
        if client.status() == ClientStatus::Active {
            return Err(ClientDirectoryError::StillActive(id));
        }
        self.repository.delete(id).await?;
        info!(client_id = %id, "removed client");
        Ok(())
    }

    /// Retrieves a client by identifier.
    ///
    /// Returns `Ok(None)` when no client matches.
    ///
    /// # Errors
    ///
    /// Returns [`ClientDirectoryError::Repository`] when the lookup fails.
    pub async fn find_by_id(&self, id: ClientId) -> ClientDirectoryResult<Option<Client>> {
        Ok(self.repository.find_by_id(id).await?)
    }
}
