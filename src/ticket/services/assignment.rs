//! Least-loaded-qualified technician selection.

use crate::category::ServiceCategory;
use crate::technician::{
    domain::{Technician, TechnicianStatus},
    ports::{TechnicianRepository, TechnicianRepositoryError},
};
use crate::ticket::ports::{TicketRepository, TicketRepositoryError};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Errors returned while scanning the candidate pool.
#[derive(Debug, Error)]
pub enum AssignmentError {
    /// Technician pool lookup failed.
    #[error(transparent)]
    Technicians(#[from] TechnicianRepositoryError),
    /// Workload count failed.
    #[error(transparent)]
    Tickets(#[from] TicketRepositoryError),
}

/// Result type for assignment selection.
pub type AssignmentResult<T> = Result<T, AssignmentError>;

/// Greedy, recomputed-on-demand technician selector.
///
/// Every call rescans the live pool of active technicians, so the result
/// reflects assignments made since the previous call. Ties on load are
/// broken by technician identifier ascending, keeping selection
/// deterministic.
#[derive(Clone)]
pub struct AssignmentSelector<R, T>
where
    R: TechnicianRepository,
    T: TicketRepository,
{
    technicians: Arc<R>,
    tickets: Arc<T>,
}

impl<R, T> AssignmentSelector<R, T>
where
    R: TechnicianRepository,
    T: TicketRepository,
{
    /// Creates a new assignment selector.
    #[must_use]
    pub const fn new(technicians: Arc<R>, tickets: Arc<T>) -> Self {
        Self {
            technicians,
            tickets,
        }
    }

    /// Returns the active technician qualified for `category` with the
    /// fewest open assigned tickets, or `None` when no such technician
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentError`] when the pool scan or a workload count
    /// fails.
    pub async fn find_best_technician_for_category(
        &self,
        category: ServiceCategory,
    ) -> AssignmentResult<Option<Technician>> {
        let pool = self
            .technicians
            .list_by_status(TechnicianStatus::Active)
            .await?;

        let mut best: Option<(u64, Technician)> = None;
        for candidate in pool {
            if !candidate.is_qualified_for(category) {
                continue;
            }

            let load = self
                .tickets
                .count_open_for_technician(candidate.id())
                .await?;
            let replaces = best.as_ref().is_none_or(|(best_load, best_candidate)| {
                (load, candidate.id()) < (*best_load, best_candidate.id())
            });
            if replaces {
                best = Some((load, candidate));
            }
        }

        debug!(
            category = %category,
            selected = best.as_ref().map(|(_, technician)| technician.id().to_string()),
            "assignment pool scanned"
        );
        Ok(best.map(|(_, technician)| technician))
    }
}
