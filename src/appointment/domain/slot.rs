//! Validated half-open booking intervals.

use super::AppointmentDomainError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Half-open booking interval `[start, end)`.
///
/// Construction enforces ordering and the 30..=480 minute duration window,
/// so any held `TimeSlot` is bookable as far as its shape is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeSlot {
    /// Shortest bookable appointment, in minutes.
    pub const MIN_DURATION_MINUTES: i64 = 30;

    /// Longest bookable appointment, in minutes.
    pub const MAX_DURATION_MINUTES: i64 = 480;

    /// Creates a validated booking interval.
    ///
    /// # Errors
    ///
    /// Returns [`AppointmentDomainError::EndNotAfterStart`],
    /// [`AppointmentDomainError::DurationTooShort`], or
    /// [`AppointmentDomainError::DurationTooLong`] when the interval shape
    /// is not bookable.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, AppointmentDomainError> {
        if end <= start {
            return Err(AppointmentDomainError::EndNotAfterStart { start, end });
        }

        let minutes = (end - start).num_minutes();
        if minutes < Self::MIN_DURATION_MINUTES {
            return Err(AppointmentDomainError::DurationTooShort { minutes });
        }
        if minutes > Self::MAX_DURATION_MINUTES {
            return Err(AppointmentDomainError::DurationTooLong { minutes });
        }

        Ok(Self { start, end })
    }

    /// Returns the interval start.
    #[must_use]
    pub const fn start(self) -> DateTime<Utc> {
        self.start
    }

    /// Returns the interval end.
    #[must_use]
    pub const fn end(self) -> DateTime<Utc> {
        self.end
    }

    /// Returns the interval length.
    #[must_use]
    pub fn duration(self) -> Duration {
        self.end - self.start
    }

    /// Returns whether two half-open intervals share any instant.
    ///
    /// Back-to-back slots (one ending exactly when the other starts) do
    /// not overlap.
    #[must_use]
    pub fn overlaps(self, other: Self) -> bool {
        self.overlaps_window(other.start, other.end)
    }

    /// Returns whether the slot shares any instant with the half-open
    /// window `[start, end)`.
    ///
    /// The window need not satisfy the booking duration limits;
    /// availability queries pass arbitrary windows here.
    #[must_use]
    pub fn overlaps_window(self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start < end && start < self.end
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
