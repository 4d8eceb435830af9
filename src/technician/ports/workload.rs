//! Query port exposing a technician's current ticket workload.
//!
//! A technician's load is the count of their assigned tickets still open.
//! Modelling the count as an explicit query against the persistence
//! boundary keeps the pool scan in the assignment selector and the removal
//! guard in the directory service free of hidden object-graph walks.

use crate::technician::domain::TechnicianId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for workload queries.
pub type WorkloadQueryResult<T> = Result<T, WorkloadQueryError>;

/// Read-only count of a technician's open assigned tickets.
#[async_trait]
pub trait OpenTicketCounter: Send + Sync {
    /// Returns how many open tickets are assigned to `technician_id`.
    async fn open_ticket_count(&self, technician_id: TechnicianId) -> WorkloadQueryResult<u64>;
}

/// Errors returned by workload query implementations.
#[derive(Debug, Clone, Error)]
pub enum WorkloadQueryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl WorkloadQueryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
