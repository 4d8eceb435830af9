//! Contact scalars shared by the client and technician directories.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Normalized, validated email address.
///
/// Addresses are trimmed and lowercased on construction so that uniqueness
/// checks in the directories compare canonical forms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidEmailAddress`] when the value does not contain
    /// exactly one `@` with non-empty local and domain parts.
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidEmailAddress> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();
        let mut segments = normalized.split('@');
        let local = segments.next().unwrap_or_default();
        let domain = segments.next().unwrap_or_default();
        let has_more_segments = segments.next().is_some();
        let is_valid = !local.is_empty()
            && !domain.is_empty()
            && !has_more_segments
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(InvalidEmailAddress(raw));
        }

        Ok(Self(normalized))
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.0)
    }
}

/// Error returned when an email address fails validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid email address: {0}")]
pub struct InvalidEmailAddress(pub String);

#[cfg(test)]
mod tests {
    use super::{EmailAddress, InvalidEmailAddress};
    use rstest::rstest;

    #[rstest]
    #[case("ada@example.com", "ada@example.com")]
    #[case("  Ada@Example.COM  ", "ada@example.com")]
    fn new_normalizes_valid_addresses(#[case] raw: &str, #[case] expected: &str) {
        let email = EmailAddress::new(raw).expect("valid email address");
        assert_eq!(email.as_str(), expected);
    }

    #[rstest]
    #[case("no-at-sign")]
    #[case("@example.com")]
    #[case("ada@")]
    #[case("ada@@example.com")]
    #[case("ada smith@example.com")]
    fn new_rejects_malformed_addresses(#[case] raw: &str) {
        assert_eq!(
            EmailAddress::new(raw),
            Err(InvalidEmailAddress(raw.to_owned()))
        );
    }
}
