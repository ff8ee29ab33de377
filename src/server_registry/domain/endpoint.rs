//! Network endpoint types: host address, port, and SSH username.

use super::ServerDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

/// Maximum total length of a hostname.
const MAX_HOSTNAME_LENGTH: usize = 253;

/// Maximum length of a single hostname label.
const MAX_LABEL_LENGTH: usize = 63;

/// Validated server host: an IP address literal or an RFC-1123 hostname.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostAddress(String);

impl HostAddress {
    /// Creates a validated host address.
    ///
    /// Accepts IPv4 dotted quads, IPv6 literals, and RFC-1123 hostnames.
    /// All-numeric final labels are rejected so that malformed dotted quads
    /// such as `999.1.1.1` do not pass as hostnames.
    ///
    /// # Errors
    ///
    /// Returns [`ServerDomainError`] when the host is empty or malformed.
    pub fn new(value: impl Into<String>) -> Result<Self, ServerDomainError> {
        let trimmed = value.into().trim().to_owned();

        if trimmed.is_empty() {
            return Err(ServerDomainError::EmptyHost);
        }

        if trimmed.parse::<IpAddr>().is_ok() || is_valid_hostname(&trimmed) {
            return Ok(Self(trimmed));
        }

        Err(ServerDomainError::InvalidHost(trimmed))
    }

    /// Returns the host as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for HostAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for HostAddress {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

fn is_valid_label(label: &str) -> bool {
    if label.is_empty() || label.len() > MAX_LABEL_LENGTH {
        return false;
    }
    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }
    label
        .chars()
        .all(|character| character.is_ascii_alphanumeric() || character == '-')
}

fn is_valid_hostname(host: &str) -> bool {
    if host.len() > MAX_HOSTNAME_LENGTH {
        return false;
    }

    let mut labels = host.split('.').peekable();
    let mut last_label = "";
    while let Some(label) = labels.next() {
        if !is_valid_label(label) {
            return false;
        }
        if labels.peek().is_none() {
            last_label = label;
        }
    }

    // An all-numeric final label can only be a (possibly malformed) IP.
    !last_label.chars().all(|character| character.is_ascii_digit())
}

/// Validated TCP port in the range 1-65535.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Port(u16);

impl Port {
    /// Creates a validated port.
    ///
    /// # Errors
    ///
    /// Returns [`ServerDomainError::InvalidPort`] when the port is zero.
    pub const fn new(value: u16) -> Result<Self, ServerDomainError> {
        if value == 0 {
            return Err(ServerDomainError::InvalidPort(value));
        }
        Ok(Self(value))
    }

    /// Returns the port number.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

/// Validated SSH login name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SshUsername(String);

impl SshUsername {
    /// Creates a validated SSH username drawn from `[A-Za-z0-9_-]+`.
    ///
    /// # Errors
    ///
    /// Returns [`ServerDomainError`] when the username is empty or contains
    /// invalid characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ServerDomainError> {
        let trimmed = value.into().trim().to_owned();

        if trimmed.is_empty() {
            return Err(ServerDomainError::EmptyUsername);
        }

        let is_valid = trimmed
            .chars()
            .all(|character| character.is_ascii_alphanumeric() || character == '-' || character == '_');
        if !is_valid {
            return Err(ServerDomainError::InvalidUsername(trimmed));
        }

        Ok(Self(trimmed))
    }

    /// Returns the username as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SshUsername {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for SshUsername {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}
