//! In-memory technician repository for services and tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::contact::EmailAddress;
use crate::technician::{
    domain::{Technician, TechnicianId, TechnicianStatus},
    ports::{TechnicianRepository, TechnicianRepositoryError, TechnicianRepositoryResult},
};

/// Thread-safe in-memory technician repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTechnicianRepository {
    state: Arc<RwLock<InMemoryTechnicianState>>,
}

#[derive(Debug, Default)]
struct InMemoryTechnicianState {
    technicians: HashMap<TechnicianId, Technician>,
    email_index: HashMap<EmailAddress, TechnicianId>,
}

impl InMemoryTechnicianRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TechnicianRepository for InMemoryTechnicianRepository {
    async fn insert(&self, technician: &Technician) -> TechnicianRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TechnicianRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.technicians.contains_key(&technician.id()) {
            return Err(TechnicianRepositoryError::DuplicateTechnician(
                technician.id(),
            ));
        }
        if state.email_index.contains_key(technician.email()) {
            return Err(TechnicianRepositoryError::DuplicateEmail(
                technician.email().clone(),
            ));
        }

        state
            .email_index
            .insert(technician.email().clone(), technician.id());
        state.technicians.insert(technician.id(), technician.clone());
        Ok(())
    }

    async fn update_if_unchanged(
        &self,
        expected: &Technician,
        updated: &Technician,
    ) -> TechnicianRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TechnicianRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let stored = state
            .technicians
            .get(&updated.id())
            .ok_or(TechnicianRepositoryError::NotFound(updated.id()))?;
        if stored != expected {
            return Err(TechnicianRepositoryError::ConcurrentModification(
                updated.id(),
            ));
        }

        state.technicians.insert(updated.id(), updated.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: TechnicianId,
    ) -> TechnicianRepositoryResult<Option<Technician>> {
        let state = self.state.read().map_err(|err| {
            TechnicianRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.technicians.get(&id).cloned())
    }

    async fn list_by_status(
        &self,
        status: TechnicianStatus,
    ) -> TechnicianRepositoryResult<Vec<Technician>> {
        let state = self.state.read().map_err(|err| {
            TechnicianRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut matching: Vec<Technician> = state
            .technicians
            .values()
            .filter(|technician| technician.status() == status)
            .cloned()
            .collect();
        matching.sort_by_key(Technician::id);
        Ok(matching)
    }

    async fn delete(&self, id: TechnicianId) -> TechnicianRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            TechnicianRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let removed = state
            .technicians
            .remove(&id)
            .ok_or(TechnicianRepositoryError::NotFound(id))?;
        state.email_index.remove(removed.email());
        Ok(())
    }
}
