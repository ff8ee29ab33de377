//! Validated display name and description for server records.

use super::ServerDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum length for a server display name.
const MIN_SERVER_NAME_LENGTH: usize = 2;

/// Maximum length for a server display name, matching `VARCHAR(255)`.
const MAX_SERVER_NAME_LENGTH: usize = 255;

/// Maximum length for a server description.
const MAX_DESCRIPTION_LENGTH: usize = 500;

/// Validated server display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerName(String);

impl ServerName {
    /// Creates a validated server name.
    ///
    /// The input is trimmed. Names must be 2-255 characters drawn from
    /// `[A-Za-z0-9 _-]`.
    ///
    /// # Errors
    ///
    /// Returns [`ServerDomainError`] when validation fails.
    pub fn new(value: impl Into<String>) -> Result<Self, ServerDomainError> {
        let trimmed = value.into().trim().to_owned();

        if trimmed.is_empty() {
            return Err(ServerDomainError::EmptyServerName);
        }
        if trimmed.chars().count() < MIN_SERVER_NAME_LENGTH {
            return Err(ServerDomainError::ServerNameTooShort);
        }
        if trimmed.chars().count() > MAX_SERVER_NAME_LENGTH {
            return Err(ServerDomainError::ServerNameTooLong);
        }

        let is_valid = trimmed.chars().all(|character| {
            character.is_ascii_alphanumeric()
                || character == ' '
                || character == '-'
                || character == '_'
        });
        if !is_valid {
            return Err(ServerDomainError::InvalidServerName(trimmed));
        }

        Ok(Self(trimmed))
    }

    /// Returns the server name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ServerName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ServerName {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Optional free-text server description, capped at 500 characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServerDescription(String);

impl ServerDescription {
    /// Creates a validated description.
    ///
    /// # Errors
    ///
    /// Returns [`ServerDomainError::DescriptionTooLong`] when the text
    /// exceeds 500 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ServerDomainError> {
        let text = value.into();
        if text.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(ServerDomainError::DescriptionTooLong);
        }
        Ok(Self(text))
    }

    /// Returns the description as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ServerDescription {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for ServerDescription {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
