//! Error types for server domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing server domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServerDomainError {
    /// The server name is empty after trimming.
    #[error("server name must not be empty")]
    EmptyServerName,

    /// The server name is shorter than two characters.
    #[error("server name must be at least 2 characters")]
    ServerNameTooShort,

    /// The server name exceeds the 255-character limit.
    #[error("server name exceeds 255 character limit")]
    ServerNameTooLong,

    /// The server name contains characters outside `[A-Za-z0-9 _-]`.
    #[error(
        "server name '{0}' contains invalid characters (only alphanumeric, spaces, hyphens, and underscores allowed)"
    )]
    InvalidServerName(String),

    /// The description exceeds the 500-character limit.
    #[error("server description exceeds 500 character limit")]
    DescriptionTooLong,

    /// The host is empty after trimming.
    #[error("host must not be empty")]
    EmptyHost,

    /// The host is neither a valid IP address nor a valid hostname.
    #[error("host '{0}' is neither a valid IP address nor a valid hostname")]
    InvalidHost(String),

    /// The port is outside the valid 1-65535 range.
    #[error("port {0} is outside the valid range 1-65535")]
    InvalidPort(u16),

    /// The SSH username is empty.
    #[error("SSH username must not be empty")]
    EmptyUsername,

    /// The SSH username contains characters outside `[A-Za-z0-9_-]`.
    #[error(
        "SSH username '{0}' contains invalid characters (only alphanumeric, hyphens, and underscores allowed)"
    )]
    InvalidUsername(String),

    /// Neither a password nor a private key path was provided.
    #[error("either an SSH password or a private key path is required")]
    MissingSshCredential,

    /// Both a password and a private key path were provided.
    #[error("provide either an SSH password or a private key path, not both")]
    BothSshCredentialsProvided,

    /// The private key path is relative or has an unsupported extension.
    #[error("invalid SSH private key path '{0}' (must be absolute; .pem, .key, or .ppk)")]
    InvalidPrivateKeyPath(String),
}

/// Error returned while parsing a server lifecycle status.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown server status: {0}")]
pub struct ParseServerStatusError(pub String);

/// Error returned while parsing a list sort key.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sort key: {0}")]
pub struct ParseSortKeyError(pub String);

/// Error returned while parsing a list sort direction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown sort direction: {0}")]
pub struct ParseSortOrderError(pub String);
