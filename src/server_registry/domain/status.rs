//! Server lifecycle status.

use super::ParseServerStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a managed server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerStatus {
    /// The server is the current deployment target for its organization.
    Active,
    /// The server is registered but not currently selected.
    Inactive,
    /// The server is undergoing maintenance and excluded from selection.
    Maintenance,
}

impl ServerStatus {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Maintenance => "maintenance",
        }
    }
}

impl fmt::Display for ServerStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ServerStatus {
    type Error = ParseServerStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(ParseServerStatusError(value.to_owned())),
        }
    }
}
