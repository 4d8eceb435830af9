//! Appointment aggregate root and status lifecycle.

use super::{AppointmentDomainError, ParseAppointmentStatusError, TimeSlot};
use crate::technician::domain::TechnicianId;
use crate::ticket::domain::TicketId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppointmentId(Uuid);

impl AppointmentId {
    /// Creates a new random appointment identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an appointment identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for AppointmentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Appointment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    /// Booked, awaiting confirmation.
    Pending,
    /// Confirmed by the client.
    Confirmed,
    /// Technician on site.
    InProgress,
    /// Work finished.
    Completed,
    /// Called off before completion.
    Cancelled,
    /// Client did not appear.
    NoShow,
}

impl AppointmentStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
        }
    }

    /// Returns whether no further transitions are permitted from this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::NoShow)
    }

    /// Returns whether an appointment in this status occupies its
    /// technician's calendar for conflict purposes.
    #[must_use]
    pub const fn blocks_schedule(self) -> bool {
        !matches!(self, Self::Cancelled | Self::NoShow)
    }

    /// Returns whether transition to `target` is allowed.
    ///
    /// Same-state changes are idempotent no-ops for non-terminal statuses;
    /// terminal statuses accept nothing, including themselves.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Pending | Self::Confirmed | Self::Cancelled)
                | (
                    Self::Confirmed,
                    Self::Confirmed | Self::InProgress | Self::Cancelled | Self::NoShow,
                )
                | (Self::InProgress, Self::InProgress | Self::Completed)
        )
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AppointmentStatus {
    type Error = ParseAppointmentStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "no_show" => Ok(Self::NoShow),
            _ => Err(ParseAppointmentStatusError(value.to_owned())),
        }
    }
}

/// Appointment aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    id: AppointmentId,
    technician_id: TechnicianId,
    ticket_id: TicketId,
    slot: TimeSlot,
    status: AppointmentStatus,
    cancellation_reason: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted appointment aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedAppointmentData {
    /// Persisted appointment identifier.
    pub id: AppointmentId,
    /// Persisted technician reference.
    pub technician_id: TechnicianId,
    /// Persisted ticket reference.
    pub ticket_id: TicketId,
    /// Persisted booking interval.
    pub slot: TimeSlot,
    /// Persisted lifecycle status.
    pub status: AppointmentStatus,
    /// Persisted cancellation reason, if any.
    pub cancellation_reason: Option<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// Creates a new pending appointment for a future slot.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentDomainError::StartInPast`] when the slot starts
    /// before the current clock time.
    pub fn new(
        technician_id: TechnicianId,
        ticket_id: TicketId,
        slot: TimeSlot,
        clock: &impl Clock,
    ) -> Result<Self, AppointmentDomainError> {
        let now = clock.utc();
        if slot.start() < now {
            return Err(AppointmentDomainError::StartInPast {
                start: slot.start(),
                now,
            });
        }

        Ok(Self {
            id: AppointmentId::new(),
            technician_id,
            ticket_id,
            slot,
            status: AppointmentStatus::Pending,
            cancellation_reason: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstructs an appointment from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedAppointmentData) -> Self {
        Self {
            id: data.id,
            technician_id: data.technician_id,
            ticket_id: data.ticket_id,
            slot: data.slot,
            status: data.status,
            cancellation_reason: data.cancellation_reason,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the appointment identifier.
    #[must_use]
    pub const fn id(&self) -> AppointmentId {
        self.id
    }

    /// Returns the booked technician.
    #[must_use]
    pub const fn technician_id(&self) -> TechnicianId {
        self.technician_id
    }

    /// Returns the ticket being visited.
    #[must_use]
    pub const fn ticket_id(&self) -> TicketId {
        self.ticket_id
    }

    /// Returns the booking interval.
    #[must_use]
    pub const fn slot(&self) -> TimeSlot {
        self.slot
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> AppointmentStatus {
        self.status
    }

    /// Returns the cancellation reason, if the appointment was cancelled.
    #[must_use]
    pub fn cancellation_reason(&self) -> Option<&str> {
        self.cancellation_reason.as_deref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest lifecycle timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether this appointment occupies its technician's calendar.
    #[must_use]
    pub const fn blocks_schedule(&self) -> bool {
        self.status.blocks_schedule()
    }

    /// Moves the appointment to `target` after consulting the transition
    /// table.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentDomainError::InvalidStatusTransition`] when the
    /// table denies the change; the aggregate is left untouched.
    pub fn transition_to(
        &mut self,
        target: AppointmentStatus,
        clock: &impl Clock,
    ) -> Result<(), AppointmentDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(AppointmentDomainError::InvalidStatusTransition {
                appointment_id: self.id,
                from: self.status,
                to: target,
            });
        }

        self.status = target;
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Cancels the appointment, recording the reason.
    ///
    /// Cancellation is a forced operation: it succeeds from any status
    /// except completed or already cancelled, bypassing the ordinary
    /// transition table.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentDomainError::CannotCancelCompleted`] or
    /// [`AppointmentDomainError::AlreadyCancelled`].
    pub fn cancel(
        &mut self,
        reason: impl Into<String>,
        clock: &impl Clock,
    ) -> Result<(), AppointmentDomainError> {
        match self.status {
            AppointmentStatus::Completed => {
                Err(AppointmentDomainError::CannotCancelCompleted(self.id))
            }
            AppointmentStatus::Cancelled => Err(AppointmentDomainError::AlreadyCancelled(self.id)),
            AppointmentStatus::Pending
            | AppointmentStatus::Confirmed
            | AppointmentStatus::InProgress
            | AppointmentStatus::NoShow => {
                self.status = AppointmentStatus::Cancelled;
                self.cancellation_reason = Some(reason.into());
                self.updated_at = clock.utc();
                Ok(())
            }
        }
    }
}
