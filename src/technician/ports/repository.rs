//! Repository port for technician persistence and lookup.

use crate::contact::EmailAddress;
use crate::technician::domain::{Technician, TechnicianId, TechnicianStatus};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for technician repository operations.
pub type TechnicianRepositoryResult<T> = Result<T, TechnicianRepositoryError>;

/// Technician persistence contract.
#[async_trait]
pub trait TechnicianRepository: Send + Sync {
    /// Stores a new technician.
    ///
    /// # Errors
    ///
    /// Returns [`TechnicianRepositoryError::DuplicateTechnician`] when the
    /// technician ID already exists or
    /// [`TechnicianRepositoryError::DuplicateEmail`] when the email address
    /// is already registered.
    async fn insert(&self, technician: &Technician) -> TechnicianRepositoryResult<()>;

    /// Persists changes to an existing technician, but only while the
    /// stored record still equals `expected`.
    ///
    /// The comparison and the write must be one atomic step; callers reload
    /// and revalidate when the swap is refused.
    ///
    /// # Errors
    ///
    /// Returns [`TechnicianRepositoryError::NotFound`] when the technician
    /// does not exist and
    /// [`TechnicianRepositoryError::ConcurrentModification`] when the stored
    /// record no longer matches `expected`.
    async fn update_if_unchanged(
        &self,
        expected: &Technician,
        updated: &Technician,
    ) -> TechnicianRepositoryResult<()>;

    /// Finds a technician by identifier.
    ///
    /// Returns `None` when the technician does not exist.
    async fn find_by_id(&self, id: TechnicianId) -> TechnicianRepositoryResult<Option<Technician>>;

    /// Returns all technicians currently in `status`.
    ///
    /// The assignment selector rescans this live pool on every call.
    async fn list_by_status(
        &self,
        status: TechnicianStatus,
    ) -> TechnicianRepositoryResult<Vec<Technician>>;

    /// Removes a technician record.
    ///
    /// Eligibility (terminated, zero open tickets) is the directory
    /// service's responsibility; the repository only removes the row.
    ///
    /// # Errors
    ///
    /// Returns [`TechnicianRepositoryError::NotFound`] when the technician
    /// does not exist.
    async fn delete(&self, id: TechnicianId) -> TechnicianRepositoryResult<()>;
}

/// Errors returned by technician repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TechnicianRepositoryError {
    /// A technician with the same identifier already exists.
    #[error("duplicate technician identifier: {0}")]
    DuplicateTechnician(TechnicianId),

    /// A technician with the same email address already exists.
    #[error("duplicate technician email: {0}")]
    DuplicateEmail(EmailAddress),

    /// The technician was not found.
    #[error("technician not found: {0}")]
    NotFound(TechnicianId),

    /// The stored technician changed between the caller's read and its
    /// write.
    #[error("technician {0} was modified concurrently")]
    ConcurrentModification(TechnicianId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TechnicianRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
