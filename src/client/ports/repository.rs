//! Repository port for client persistence and lookup.

use crate::client::domain::{Client, ClientId};
use crate::contact::EmailAddress;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for client repository operations.
pub type ClientRepositoryResult<T> = Result<T, ClientRepositoryError>;

/// Client persistence contract.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Stores a new client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientRepositoryError::DuplicateClient`] when the client ID
    /// already exists or [`ClientRepositoryError::DuplicateEmail`] when the
    /// email address is already registered.
    async fn insert(&self, client: &Client) -> ClientRepositoryResult<()>;

    /// Persists changes to an existing client, but only while the stored
    /// record still equals `expected`.
    ///
    /// The comparison and the write must be one atomic step; callers reload
    /// and revalidate when the swap is refused.
    ///
    /// # Errors
    ///
    /// Returns [`ClientRepositoryError::NotFound`] when the client does not
    /// exist and [`ClientRepositoryError::ConcurrentModification`] when the
    /// stored record no longer matches `expected`.
    async fn update_if_unchanged(
        &self,
        expected: &Client,
        updated: &Client,
    ) -> ClientRepositoryResult<()>;

    /// Finds a client by identifier.
    ///
    /// Returns `None` when the client does not exist.
    async fn find_by_id(&self, id: ClientId) -> ClientRepositoryResult<Option<Client>>;

    /// Removes a client record.
    ///
    /// Eligibility (the client must not be active) is the directory
    /// service's responsibility; the repository only removes the row.
    ///
    /// # Errors
    ///
    /// Returns [`ClientRepositoryError::NotFound`] when the client does not
    /// exist.
    async fn delete(&self, id: ClientId) -> ClientRepositoryResult<()>;
}

/// Errors returned by client repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ClientRepositoryError {
    /// A client with the same identifier already exists.
    #[error("duplicate client identifier: {0}")]
    DuplicateClient(ClientId),

    /// A client with the same email address already exists.
    #[error("duplicate client email: {0}")]
    DuplicateEmail(EmailAddress),

    /// The client was not found.
    #[error("client not found: {0}")]
    NotFound(ClientId),

    /// The stored client changed between the caller's read and its write.
    #[error("client {0} was modified concurrently")]
    ConcurrentModification(ClientId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ClientRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
