//! Directory service for registering technicians, applying status changes,
//! and enforcing the load-guarded removal rule.

use crate::category::ServiceCategory;
use crate::contact::{EmailAddress, InvalidEmailAddress};
use crate::technician::{
    domain::{Technician, TechnicianDomainError, TechnicianId, TechnicianStatus},
    ports::{
        OpenTicketCounter, TechnicianRepository, TechnicianRepositoryError, WorkloadQueryError,
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for registering a technician.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterTechnicianRequest {
    name: String,
    email: String,
    skills: Vec<ServiceCategory>,
}

impl RegisterTechnicianRequest {
    /// Creates a request with required directory fields.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            skills: Vec::new(),
        }
    }

    /// Sets the initial qualification skills.
    #[must_use]
    pub fn with_skills(mut self, skills: impl IntoIterator<Item = ServiceCategory>) -> Self {
        self.skills = skills.into_iter().collect();
        self
    }
}

/// Service-level errors for technician directory operations.
#[derive(Debug, Error)]
pub enum TechnicianDirectoryError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TechnicianDomainError),
    /// The supplied email address is malformed.
    #[error(transparent)]
    InvalidEmail(#[from] InvalidEmailAddress),
    /// The referenced technician does not exist.
    #[error("technician not found: {0}")]
    NotFound(TechnicianId),
    /// Removal was requested before the technician was terminated.
    #[error("technician {technician_id} is {status} and cannot be removed")]
    NotTerminated {
        /// Technician whose removal was rejected.
        technician_id: TechnicianId,
        /// Status at decision time.
        status: TechnicianStatus,
    },
    /// Removal was requested while open tickets remain assigned.
    #[error("technician {technician_id} still has {open_tickets} open tickets")]
    OpenTicketsRemain {
        /// Technician whose removal was rejected.
        technician_id: TechnicianId,
        /// Number of open tickets still assigned.
        open_tickets: u64,
    },
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TechnicianRepositoryError),
    /// Workload query failed.
    #[error(transparent)]
    Workload(#[from] WorkloadQueryError),
}

/// Result type for technician directory operations.
pub type TechnicianDirectoryResult<T> = Result<T, TechnicianDirectoryError>;

/// Technician directory orchestration service.
#[derive(Clone)]
pub struct TechnicianDirectoryService<R, W, C>
where
    R: TechnicianRepository,
    W: OpenTicketCounter,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    workload: Arc<W>,
    clock: Arc<C>,
}

impl<R, W, C> TechnicianDirectoryService<R, W, C>
where
    R: TechnicianRepository,
    W: OpenTicketCounter,
    C: Clock + Send + Sync,
{
    /// Creates a new technician directory service.
    #[must_use]
    pub const fn new(repository: Arc<R>, workload: Arc<W>, clock: Arc<C>) -> Self {
        Self {
            repository,
            workload,
            clock,
        }
    }

    /// Registers a new active technician.
    ///
    /// # Errors
    ///
    /// Returns [`TechnicianDirectoryError`] when the name or email fails
    /// validation or the email is already registered.
    pub async fn register(
        &self,
        request: RegisterTechnicianRequest,
    ) -> TechnicianDirectoryResult<Technician> {
        let email = EmailAddress::new(request.email)?;
        let technician = Technician::new(request.name, email, request.skills, &*self.clock)?;
        self.repository.insert(&technician).await?;
        info!(technician_id = %technician.id(), "registered technician");
        Ok(technician)
    }

    /// Moves a technician to `target` after consulting the transition table.
    ///
    /// # Errors
    ///
    /// Returns [`TechnicianDirectoryError::NotFound`] when the technician
    /// does not exist, or a domain error when the transition is denied.
    pub async fn set_status(
        &self,
        id: TechnicianId,
        target: TechnicianStatus,
    ) -> TechnicianDirectoryResult<Technician> {
        loop {
            let snapshot = self
                .repository
                .find_by_id(id)
                .await?
                .ok_or(TechnicianDirectoryError::NotFound(id))?;
            let mut updated = snapshot.clone();
            updated.transition_to(target, &*self.clock)?;
            match self
                .repository
                .update_if_unchanged(&snapshot, &updated)
                .await
            {
                Ok(()) => return Ok(updated),
                Err(TechnicianRepositoryError::ConcurrentModification(_)) => continue,
                Err(other) => return Err(other.into()),
            }
        }
    }

    /// Puts a technician on duty.
    ///
    /// # Errors
    ///
    /// See [`Self::set_status`].
    pub async fn activate(&self, id: TechnicianId) -> TechnicianDirectoryResult<Technician> {
        self.set_status(id, TechnicianStatus::Active).await
    }

    /// Takes a technician off duty.
    ///
    /// # Errors
    ///
    /// See [`Self::set_status`].
    pub async fn deactivate(&self, id: TechnicianId) -> TechnicianDirectoryResult<Technician> {
        self.set_status(id, TechnicianStatus::Inactive).await
    }

    /// Sends a technician to training.
    ///
    /// # Errors
    ///
    /// See [`Self::set_status`].
    pub async fn start_training(&self, id: TechnicianId) -> TechnicianDirectoryResult<Technician> {
        self.set_status(id, TechnicianStatus::InTraining).await
    }

    /// Puts a technician on vacation.
    ///
    /// # Errors
    ///
    /// See [`Self::set_status`].
    pub async fn start_vacation(&self, id: TechnicianId) -> TechnicianDirectoryResult<Technician> {
        self.set_status(id, TechnicianStatus::OnVacation).await
    }

    /// Ends a technician's employment.
    ///
    /// # Errors
    ///
    /// See [`Self::set_status`].
    pub async fn terminate(&self, id: TechnicianId) -> TechnicianDirectoryResult<Technician> {
        self.set_status(id, TechnicianStatus::Terminated).await
    }

    /// Adds a qualification skill to a technician.
    ///
    /// # Errors
    ///
    /// Returns [`TechnicianDirectoryError::NotFound`] when the technician
    /// does not exist.
    pub async fn add_skill(
        &self,
        id: TechnicianId,
        category: ServiceCategory,
    ) -> TechnicianDirectoryResult<Technician> {
        loop {
            let snapshot = self
                .repository
                .find_by_id(id)
                .await?
                .ok_or(TechnicianDirectoryError::NotFound(id))?;
            let mut updated = snapshot.clone();
            updated.add_skill(category, &*self.clock);
            match self
                .repository
                .update_if_unchanged(&snapshot, &updated)
                .await
            {
                Ok(()) => return Ok(updated),
                Err(TechnicianRepositoryError::ConcurrentModification(_)) => continue,
                Err(other) => return Err(other.into()),
            }
        }
    }

    /// Removes a technician record.
    ///
    /// Removal requires a terminated technician with no open tickets still
    /// assigned.
    ///
    /// # Errors
    ///
    /// Returns [`TechnicianDirectoryError::NotTerminated`] or
    /// [`TechnicianDirectoryError::OpenTicketsRemain`] when the guard
    /// rejects the removal, and [`TechnicianDirectoryError::NotFound`] when
    /// the technician does not exist.
    pub async fn remove(&self, id: TechnicianId) -> TechnicianDirectoryResult<()> {
        let technician = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TechnicianDirectoryError::NotFound(id))?;
        if technician.status() != TechnicianStatus::Terminated {
            warn!(technician_id = %id, status = %technician.status(), "removal rejected");
            return Err(TechnicianDirectoryError::NotTerminated {
                technician_id: id,
                status: technician.status(),
            });
        }

        let open_tickets = self.workload.open_ticket_count(id).await?;
        if open_tickets > 0 {
            warn!(technician_id = %id, open_tickets, "removal rejected");
            return Err(TechnicianDirectoryError::OpenTicketsRemain {
                technician_id: id,
                open_tickets,
            });
        }

        self.repository.delete(id).await?;
        info!(technician_id = %id, "removed technician");
        Ok(())
    }

    /// Retrieves a technician by identifier.
    ///
    /// Returns `Ok(None)` when no technician matches.
    ///
    /// # Errors
    ///
    /// Returns [`TechnicianDirectoryError::Repository`] when the lookup
    /// fails.
    pub async fn find_by_id(
        &self,
        id: TechnicianId,
    ) -> TechnicianDirectoryResult<Option<Technician>> {
        Ok(self.repository.find_by_id(id).await?)
    }
}
