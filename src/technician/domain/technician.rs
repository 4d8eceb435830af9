//! Technician aggregate root, status lifecycle, and qualification skills.

use super::{ParseTechnicianStatusError, TechnicianDomainError};
use crate::category::ServiceCategory;
use crate::contact::EmailAddress;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a technician.
///
/// Orders by the underlying UUID bytes; the assignment selector relies on
/// this ordering as the deterministic tie-break between equally loaded
/// candidates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TechnicianId(Uuid);

impl TechnicianId {
    /// Creates a new random technician identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a technician identifier from an existing UUID.
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

impl Default for TechnicianId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TechnicianId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Technician employment status.
///
/// Only [`TechnicianStatus::Active`] technicians may receive new ticket
/// assignments or appointments. [`TechnicianStatus::Terminated`] is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechnicianStatus {
    /// On duty; eligible for assignments and appointments.
    Active,
    /// Off duty; retains assignments but receives no new work.
    Inactive,
    /// Onboarding; not yet eligible for work.
    InTraining,
    /// Temporarily away.
    OnVacation,
    /// Employment ended; no further transitions.
    Terminated,
}

impl TechnicianStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::InTraining => "in_training",
            Self::OnVacation => "on_vacation",
            Self::Terminated => "terminated",
        }
    }

    /// Returns whether no further transitions are permitted from this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Terminated)
    }

    /// Returns whether transition to `target` is allowed.
    ///
    /// Same-state changes are idempotent no-ops for non-terminal statuses.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (
                Self::Active,
                Self::Active
                    | Self::Inactive
                    | Self::InTraining
                    | Self::OnVacation
                    | Self::Terminated,
            ) | (Self::Inactive, Self::Inactive | Self::Active | Self::Terminated)
                | (
                    Self::InTraining,
                    Self::InTraining | Self::Active | Self::Inactive | Self::Terminated,
                )
                | (
                    Self::OnVacation,
                    Self::OnVacation | Self::Active | Self::Inactive | Self::Terminated,
                )
        )
    }
}

impl fmt::Display for TechnicianStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TechnicianStatus {
    type Error = ParseTechnicianStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "in_training" => Ok(Self::InTraining),
            "on_vacation" => Ok(Self::OnVacation),
            "terminated" => Ok(Self::Terminated),
            _ => Err(ParseTechnicianStatusError(value.to_owned())),
        }
    }
}

/// Technician aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Technician {
    id: TechnicianId,
    name: String,
    email: EmailAddress,
    status: TechnicianStatus,
    skills: BTreeSet<ServiceCategory>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted technician aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTechnicianData {
    /// Persisted technician identifier.
    pub id: TechnicianId,
    /// Persisted display name.
    pub name: String,
    /// Persisted email address.
    pub email: EmailAddress,
    /// Persisted employment status.
    pub status: TechnicianStatus,
    /// Persisted qualification skills.
    pub skills: BTreeSet<ServiceCategory>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Technician {
    /// Creates a new active technician with the given qualification skills.
    ///
    /// # Errors
    ///
    /// Returns [`TechnicianDomainError::EmptyName`] when the display name is
    /// empty after trimming.
    pub fn new(
        name: impl Into<String>,
        email: EmailAddress,
        skills: impl IntoIterator<Item = ServiceCategory>,
        clock: &impl Clock,
    ) -> Result<Self, TechnicianDomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(TechnicianDomainError::EmptyName);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: TechnicianId::new(),
            name,
            email,
            status: TechnicianStatus::Active,
            skills: skills.into_iter().collect(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a technician from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTechnicianData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            email: data.email,
            status: data.status,
            skills: data.skills,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the technician identifier.
    #[must_use]
    pub const fn id(&self) -> TechnicianId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the employment status.
    #[must_use]
    pub const fn status(&self) -> TechnicianStatus {
        self.status
    }

    /// Returns the qualification skill set.
    #[must_use]
    pub const fn skills(&self) -> &BTreeSet<ServiceCategory> {
        &self.skills
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

    /// Returns whether the technician is qualified for `category`.
    #[must_use]
    pub fn is_qualified_for(&self, category: ServiceCategory) -> bool {
        self.skills.contains(&category)
    }

    /// Adds a qualification skill.
    pub fn add_skill(&mut self, category: ServiceCategory, clock: &impl Clock) {
        if self.skills.insert(category) {
            self.updated_at = clock.utc();
        }
    }

    /// Moves the technician to `target` after consulting the transition table.
    ///
    /// # Errors
    ///
    /// Returns [`TechnicianDomainError::InvalidStatusTransition`] when the
    /// table denies the change; the aggregate is left untouched.
    pub fn transition_to(
        &mut self,
        target: TechnicianStatus,
        clock: &impl Clock,
    ) -> Result<(), TechnicianDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(TechnicianDomainError::InvalidStatusTransition {
                technician_id: self.id,
                from: self.status,
                to: target,
            });
        }

        self.status = target;
        self.updated_at = clock.utc();
        Ok(())
    }
}
