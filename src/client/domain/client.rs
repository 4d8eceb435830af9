//! Client aggregate root and status lifecycle.

use super::{ClientDomainError, ParseClientStatusError};
use crate::contact::EmailAddress;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a client account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(Uuid);

impl ClientId {
    /// Creates a new random client identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a client identifier from an existing UUID.
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

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Client account status.
///
/// Every distinct pair of statuses is a permitted transition and no status
/// is terminal; the table exists so that clients share the same validated
/// transition discipline as the other entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientStatus {
    /// Account in good standing; may file tickets.
    Active,
    /// Account disabled by the client or an operator.
    Inactive,
    /// Account suspended pending review.
    Suspended,
}

impl ClientStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Suspended => "suspended",
        }
    }

    /// Returns whether no further transitions are permitted from this status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        false
    }

    /// Returns whether transition to `target` is allowed.
    ///
    /// Same-state changes are idempotent no-ops and always allowed.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (
                Self::Active | Self::Inactive | Self::Suspended,
                Self::Active | Self::Inactive | Self::Suspended,
            )
        )
    }
}

impl fmt::Display for ClientStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ClientStatus {
    type Error = ParseClientStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "suspended" => Ok(Self::Suspended),
            _ => Err(ParseClientStatusError(value.to_owned())),
        }
    }
}

/// Client aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    id: ClientId,
    name: String,
    email: EmailAddress,
    status: ClientStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted client aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedClientData {
    /// Persisted client identifier.
    pub id: ClientId,
    /// Persisted display name.
    pub name: String,
    /// Persisted email address.
    pub email: EmailAddress,
    /// Persisted account status.
    pub status: ClientStatus,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest lifecycle timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Creates a new active client account.
    ///
    /// # Errors
    ///
    /// Returns [`ClientDomainError::EmptyName`] when the display name is
    /// empty after trimming.
    pub fn new(
        name: impl Into<String>,
        email: EmailAddress,
        clock: &impl Clock,
    ) -> Result<Self, ClientDomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ClientDomainError::EmptyName);
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: ClientId::new(),
            name,
            email,
            status: ClientStatus::Active,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a client from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedClientData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            email: data.email,
            status: data.status,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the client identifier.
    #[must_use]
    pub const fn id(&self) -> ClientId {
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

    /// Returns the account status.
    #[must_use]
    pub const fn status(&self) -> ClientStatus {
        self.status
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

    /// Moves the account to `target` after consulting the transition table.
    ///
    /// # Errors
    ///
    /// Returns [`ClientDomainError::InvalidStatusTransition`] when the table
    /// denies the change; the aggregate is left untouched.
    pub fn transition_to(
        &mut self,
        target: ClientStatus,
        clock: &impl Clock,
    ) -> Result<(), ClientDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(ClientDomainError::InvalidStatusTransition {
                client_id: self.id,
                from: self.status,
                to: target,
            });
        }

        self.status = target;
        self.updated_at = clock.utc();
        Ok(())
    }
}
