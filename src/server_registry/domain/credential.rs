//! SSH credential material for server records.

use super::ServerDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Allowed private key file extensions.
const KEY_EXTENSIONS: [&str; 3] = ["pem", "key", "ppk"];

/// SSH authentication method for a server.
///
/// Exactly one variant is ever populated; construction enforces the
/// mutual-exclusion rule between password and key-based auth.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SshCredential {
    /// Password authentication.
    Password(String),
    /// Private key authentication via an absolute key file path.
    PrivateKeyPath(String),
}

impl SshCredential {
    /// Builds a credential from optional form fields.
    ///
    /// Empty strings count as absent. Exactly one field must be populated.
    /// Key paths must be absolute and carry no extension or one of
    /// `.pem`, `.key`, `.ppk`.
    ///
    /// # Errors
    ///
    /// Returns [`ServerDomainError`] when neither or both fields are
    /// populated, or when the key path is invalid.
    pub fn from_fields(
        password: Option<&str>,
        private_key_path: Option<&str>,
    ) -> Result<Self, ServerDomainError> {
        let password = password.filter(|value| !value.is_empty());
        let key_path = private_key_path.filter(|value| !value.is_empty());

        match (password, key_path) {
            (None, None) => Err(ServerDomainError::MissingSshCredential),
            (Some(_), Some(_)) => Err(ServerDomainError::BothSshCredentialsProvided),
            (Some(secret), None) => Ok(Self::Password(secret.to_owned())),
            (None, Some(path)) => {
                validate_key_path(path)?;
                Ok(Self::PrivateKeyPath(path.to_owned()))
            }
        }
    }
}

impl fmt::Debug for SshCredential {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Password(_) => formatter.write_str("SshCredential::Password(<redacted>)"),
            Self::PrivateKeyPath(path) => {
                write!(formatter, "SshCredential::PrivateKeyPath({path})")
            }
        }
    }
}

fn validate_key_path(path: &str) -> Result<(), ServerDomainError> {
    let key_path = Path::new(path);
    if !key_path.is_absolute() {
        return Err(ServerDomainError::InvalidPrivateKeyPath(path.to_owned()));
    }

    match key_path.extension().and_then(|extension| extension.to_str()) {
        None => Ok(()),
        Some(extension) if KEY_EXTENSIONS.contains(&extension) => Ok(()),
        Some(_) => Err(ServerDomainError::InvalidPrivateKeyPath(path.to_owned())),
    }
}

/// Update-side view of the credential fields.
///
/// Server update requests may omit both credential fields, which preserves
/// whatever credential the registry already stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CredentialPatch {
    /// Keep the credential currently stored by the registry.
    Preserve,
    /// Replace the stored credential.
    Replace(SshCredential),
}

impl CredentialPatch {
    /// Builds a patch from optional form fields.
    ///
    /// Both fields absent (or empty) means [`CredentialPatch::Preserve`].
    /// Otherwise the same exactly-one rule as
    /// [`SshCredential::from_fields`] applies.
    ///
    /// # Errors
    ///
    /// Returns [`ServerDomainError`] when both fields are populated or the
    /// key path is invalid.
    pub fn from_fields(
        password: Option<&str>,
        private_key_path: Option<&str>,
    ) -> Result<Self, ServerDomainError> {
        let has_password = password.is_some_and(|value| !value.is_empty());
        let has_key = private_key_path.is_some_and(|value| !value.is_empty());

        if !has_password && !has_key {
            return Ok(Self::Preserve);
        }

        SshCredential::from_fields(password, private_key_path).map(Self::Replace)
    }
}
