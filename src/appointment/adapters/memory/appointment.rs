//! In-memory appointment repository with atomic slot exclusion.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::appointment::{
    domain::{Appointment, AppointmentId},
    ports::{AppointmentRepository, AppointmentRepositoryError, AppointmentRepositoryResult},
};
use crate::technician::domain::TechnicianId;

/// Thread-safe in-memory appointment repository.
///
/// The overlap scan and the insert in [`AppointmentRepository::insert_if_slot_free`]
/// both happen under the single write lock, which gives the atomicity the
/// port contract requires.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAppointmentRepository {
    state: Arc<RwLock<InMemoryAppointmentState>>,
}

#[derive(Debug, Default)]
struct InMemoryAppointmentState {
    appointments: HashMap<AppointmentId, Appointment>,
    technician_index: HashMap<TechnicianId, Vec<AppointmentId>>,
}

impl InMemoryAppointmentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Finds the first schedule-blocking appointment of `technician_id`
/// overlapping the half-open window `[start, end)`.
fn first_blocking_overlap(
    state: &InMemoryAppointmentState,
    technician_id: TechnicianId,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Option<&Appointment> {
    state
        .technician_index
        .get(&technician_id)
        .into_iter()
        .flatten()
        .filter_map(|id| state.appointments.get(id))
        .find(|appointment| {
            appointment.blocks_schedule() && appointment.slot().overlaps_window(start, end)
        })
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentRepository {
    async fn insert_if_slot_free(
        &self,
        appointment: &Appointment,
    ) -> AppointmentRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            AppointmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.appointments.contains_key(&appointment.id()) {
            return Err(AppointmentRepositoryError::DuplicateAppointment(
                appointment.id(),
            ));
        }
        if let Some(existing) = first_blocking_overlap(
            &state,
            appointment.technician_id(),
            appointment.slot().start(),
            appointment.slot().end(),
        ) {
            return Err(AppointmentRepositoryError::SlotTaken {
                technician_id: appointment.technician_id(),
                conflicting: existing.id(),
            });
        }

        state
            .technician_index
            .entry(appointment.technician_id())
            .or_default()
            .push(appointment.id());
        state
            .appointments
            .insert(appointment.id(), appointment.clone());
        Ok(())
    }

    async fn update_if_unchanged(
        &self,
        expected: &Appointment,
        updated: &Appointment,
    ) -> AppointmentRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            AppointmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let stored = state
            .appointments
            .get(&updated.id())
            .ok_or(AppointmentRepositoryError::NotFound(updated.id()))?;
        if stored != expected {
            return Err(AppointmentRepositoryError::ConcurrentModification(
                updated.id(),
            ));
        }

        state.appointments.insert(updated.id(), updated.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: AppointmentId,
    ) -> AppointmentRepositoryResult<Option<Appointment>> {
        let state = self.state.read().map_err(|err| {
            AppointmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.appointments.get(&id).cloned())
    }

    async fn find_blocking_overlaps(
        &self,
        technician_id: TechnicianId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppointmentRepositoryResult<Vec<Appointment>> {
        let state = self.state.read().map_err(|err| {
            AppointmentRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let overlapping = state
            .technician_index
            .get(&technician_id)
            .into_iter()
            .flatten()
            .filter_map(|id| state.appointments.get(id))
            .filter(|appointment| {
                appointment.blocks_schedule() && appointment.slot().overlaps_window(start, end)
            })
            .cloned()
            .collect();
        Ok(overlapping)
    }
}
