//! Service categories and the SLA due-date offsets derived from them.
//!
//! A category classifies a ticket's support domain. It drives two decisions:
//! which technicians qualify to take the ticket, and how long the client is
//! promised to wait (the resolution window added to the creation timestamp).

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Classification of a ticket's support domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    /// Physical equipment faults.
    Hardware,
    /// Application and operating-system issues.
    Software,
    /// Connectivity and infrastructure issues.
    Network,
}

impl ServiceCategory {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hardware => "hardware",
            Self::Software => "software",
            Self::Network => "network",
        }
    }

    /// Returns the SLA window between ticket creation and its due timestamp.
    ///
    /// Hardware faults are promised within 24 hours; every other category
    /// gets 48 hours.
    #[must_use]
    pub fn resolution_window(self) -> Duration {
        match self {
            Self::Hardware => Duration::hours(24),
            Self::Software | Self::Network => Duration::hours(48),
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ServiceCategory {
    type Error = ParseServiceCategoryError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "hardware" => Ok(Self::Hardware),
            "software" => Ok(Self::Software),
            "network" => Ok(Self::Network),
            _ => Err(ParseServiceCategoryError(value.to_owned())),
        }
    }
}

/// Error returned while parsing service categories from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown service category: {0}")]
pub struct ParseServiceCategoryError(pub String);
