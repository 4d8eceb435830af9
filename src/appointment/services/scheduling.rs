//! Service layer for booking appointments and policing slot conflicts.
//!
//! Scheduling validates the slot shape, the technician, and the ticket
//! before handing the conflict decision to the repository's atomic
//! conditional insert. Two concurrent bookings of overlapping slots for
//! one technician therefore resolve to exactly one success regardless of
//! interleaving.
//!
//! Status changes go through the repository's compare-and-swap update and
//! reload on contention, so the transition table is always consulted
//! against the stored state, never a stale read.

use crate::appointment::{
    domain::{Appointment, AppointmentDomainError, AppointmentId, AppointmentStatus, TimeSlot},
    ports::{AppointmentRepository, AppointmentRepositoryError},
};
use crate::technician::{
    domain::{TechnicianId, TechnicianStatus},
    ports::{TechnicianRepository, TechnicianRepositoryError},
};
use crate::ticket::{
    domain::{TicketId, TicketStatus},
    ports::{TicketRepository, TicketRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for booking an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleAppointmentRequest {
    technician_id: TechnicianId,
    ticket_id: TicketId,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl ScheduleAppointmentRequest {
    /// Creates a request with required booking fields.
    #[must_use]
    pub const fn new(
        technician_id: TechnicianId,
        ticket_id: TicketId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            technician_id,
            ticket_id,
            start,
            end,
        }
    }
}

/// Service-level errors for appointment scheduling operations.
#[derive(Debug, Error)]
pub enum SchedulingError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] AppointmentDomainError),
    /// The referenced appointment does not exist.
    #[error("appointment not found: {0}")]
    AppointmentNotFound(AppointmentId),
    /// The referenced technician does not exist.
    #[error("technician not found: {0}")]
    TechnicianNotFound(TechnicianId),
    /// The referenced technician exists but may not be booked.
    #[error("technician {technician_id} is {status}; bookings require an active technician")]
    TechnicianNotActive {
        /// Technician whose booking was rejected.
        technician_id: TechnicianId,
        /// Status at decision time.
        status: TechnicianStatus,
    },
    /// The referenced ticket does not exist.
    #[error("ticket not found: {0}")]
    TicketNotFound(TicketId),
    /// The referenced ticket is closed and takes no further visits.
    #[error("ticket {0} is closed; appointments require an open ticket")]
    TicketClosed(TicketId),
    /// The slot overlaps an existing booking for the technician.
    #[error("technician {technician_id} already has appointment {conflicting} in that slot")]
    SlotConflict {
        /// Technician whose calendar is occupied.
        technician_id: TechnicianId,
        /// The appointment occupying the slot.
        conflicting: AppointmentId,
    },
    /// Appointment repository operation failed.
    #[error(transparent)]
    Appointments(AppointmentRepositoryError),
    /// Technician repository operation failed.
    #[error(transparent)]
    Technicians(#[from] TechnicianRepositoryError),
    /// Ticket repository operation failed.
    #[error(transparent)]
    Tickets(#[from] TicketRepositoryError),
}

impl From<AppointmentRepositoryError> for SchedulingError {
    fn from(err: AppointmentRepositoryError) -> Self {
        match err {
            AppointmentRepositoryError::SlotTaken {
                technician_id,
                conflicting,
            } => Self::SlotConflict {
                technician_id,
                conflicting,
            },
            other => Self::Appointments(other),
        }
    }
}

/// Result type for appointment scheduling operations.
pub type SchedulingResult<T> = Result<T, SchedulingError>;

/// Appointment scheduling orchestration service.
#[derive(Clone)]
pub struct AppointmentSchedulingService<A, R, T, C>
where
    A: AppointmentRepository,
    R: TechnicianRepository,
    T: TicketRepository,
    C: Clock + Send + Sync,
{
    appointments: Arc<A>,
    technicians: Arc<R>,
    tickets: Arc<T>,
    clock: Arc<C>,
}

impl<A, R, T, C> AppointmentSchedulingService<A, R, T, C>
where
    A: AppointmentRepository,
    R: TechnicianRepository,
    T: TicketRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new appointment scheduling service.
    #[must_use]
    pub const fn new(
        appointments: Arc<A>,
        technicians: Arc<R>,
        tickets: Arc<T>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            appointments,
            technicians,
            tickets,
            clock,
        }
    }

    /// Books a pending appointment for an active technician against an
    /// open ticket, rejecting overlapping slots.
    ///
    /// # Errors
    ///
    /// Returns a domain error when the slot shape is invalid or starts in
    /// the past, [`SchedulingError::TechnicianNotFound`],
    /// [`SchedulingError::TechnicianNotActive`],
    /// [`SchedulingError::TicketNotFound`],
    /// [`SchedulingError::TicketClosed`], or
    /// [`SchedulingError::SlotConflict`] when the calendar is occupied.
    pub async fn schedule(
        &self,
        request: ScheduleAppointmentRequest,
    ) -> SchedulingResult<Appointment> {
        let slot = TimeSlot::new(request.start, request.end)?;
        let appointment =
            Appointment::new(request.technician_id, request.ticket_id, slot, &*self.clock)?;

        let technician = self
            .technicians
            .find_by_id(request.technician_id)
            .await?
            .ok_or(SchedulingError::TechnicianNotFound(request.technician_id))?;
        if technician.status() != TechnicianStatus::Active {
            return Err(SchedulingError::TechnicianNotActive {
                technician_id: request.technician_id,
                status: technician.status(),
            });
        }

        let ticket = self
            .tickets
            .find_by_id(request.ticket_id)
            .await?
            .ok_or(SchedulingError::TicketNotFound(request.ticket_id))?;
        if ticket.status() == TicketStatus::Closed {
            return Err(SchedulingError::TicketClosed(request.ticket_id));
        }

        match self.appointments.insert_if_slot_free(&appointment).await {
            Ok(()) => {
                info!(
                    appointment_id = %appointment.id(),
                    technician_id = %request.technician_id,
                    ticket_id = %request.ticket_id,
                    slot = %slot,
                    "scheduled appointment"
                );
                Ok(appointment)
            }
            Err(AppointmentRepositoryError::SlotTaken {
                technician_id,
                conflicting,
            }) => {
                warn!(
                    technician_id = %technician_id,
                    conflicting = %conflicting,
                    slot = %slot,
                    "slot conflict rejected"
                );
                Err(SchedulingError::SlotConflict {
                    technician_id,
                    conflicting,
                })
            }
            Err(other) => Err(other.into()),
        }
    }

    /// Applies a validated status change to an appointment.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulingError::AppointmentNotFound`] or a domain error
    /// when the transition table denies the change.
    pub async fn update_status(
        &self,
        appointment_id: AppointmentId,
        new_status: AppointmentStatus,
    ) -> SchedulingResult<Appointment> {
        let appointment = loop {
            let snapshot = self.load_appointment(appointment_id).await?;
            let mut updated = snapshot.clone();
            updated.transition_to(new_status, &*self.clock)?;
            match self
                .appointments
                .update_if_unchanged(&snapshot, &updated)
                .await
            {
                Ok(()) => break updated,
                Err(AppointmentRepositoryError::ConcurrentModification(_)) => continue,
                Err(other) => return Err(other.into()),
            }
        };
        info!(appointment_id = %appointment_id, status = %new_status, "updated appointment status");
        Ok(appointment)
    }

    /// Cancels an appointment, recording the reason and freeing its slot.
    ///
    /// Cancellation succeeds from any status except completed or already
    /// cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulingError::AppointmentNotFound`] or a domain error
    /// when the appointment can no longer be cancelled.
    pub async fn cancel(
        &self,
        appointment_id: AppointmentId,
        reason: impl Into<String> + Send,
    ) -> SchedulingResult<Appointment> {
        let cancellation_reason: String = reason.into();
        let appointment = loop {
            let snapshot = self.load_appointment(appointment_id).await?;
            let mut updated = snapshot.clone();
            updated.cancel(cancellation_reason.clone(), &*self.clock)?;
            match self
                .appointments
                .update_if_unchanged(&snapshot, &updated)
                .await
            {
                Ok(()) => break updated,
                Err(AppointmentRepositoryError::ConcurrentModification(_)) => continue,
                Err(other) => return Err(other.into()),
            }
        };
        info!(appointment_id = %appointment_id, "cancelled appointment");
        Ok(appointment)
    }

    /// Retrieves an appointment by identifier.
    ///
    /// Returns `Ok(None)` when no appointment matches.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulingError::Appointments`] when the lookup fails.
    pub async fn find_by_id(
        &self,
        id: AppointmentId,
    ) -> SchedulingResult<Option<Appointment>> {
        Ok(self.appointments.find_by_id(id).await?)
    }

    /// Reports whether a technician's calendar is free for the window
    /// `[start, end)`.
    ///
    /// Any ordered window may be queried; the booking duration limits apply
    /// only to [`Self::schedule`]. The answer is advisory: the booking
    /// itself is still guarded by the atomic conditional insert, so a
    /// `true` here can be overtaken by a concurrent booking.
    ///
    /// # Errors
    ///
    /// Returns a domain error when `end` is not after `start`.
    pub async fn is_technician_available(
        &self,
        technician_id: TechnicianId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> SchedulingResult<bool> {
        if end <= start {
            return Err(AppointmentDomainError::EndNotAfterStart { start, end }.into());
        }
        let overlapping = self
            .appointments
            .find_blocking_overlaps(technician_id, start, end)
            .await?;
        Ok(overlapping.is_empty())
    }

    async fn load_appointment(
        &self,
        appointment_id: AppointmentId,
    ) -> SchedulingResult<Appointment> {
        self.appointments
            .find_by_id(appointment_id)
            .await?
            .ok_or(SchedulingError::AppointmentNotFound(appointment_id))
    }
}
