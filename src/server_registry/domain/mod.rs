//! Domain model for managed server records.
//!
//! The server domain models identity, validated connection endpoints, SSH
//! credential material, lifecycle status, and the query vocabulary used to
//! page through the fleet. Infrastructure concerns remain outside this
//! boundary.

mod credential;
mod endpoint;
mod error;
mod ids;
mod name;
mod query;
mod record;
mod status;

pub use credential::{CredentialPatch, SshCredential};
pub use endpoint::{HostAddress, Port, SshUsername};
pub use error::{ParseServerStatusError, ParseSortKeyError, ParseSortOrderError, ServerDomainError};
pub use ids::{OrganizationId, ServerId, UserId};
pub use name::{ServerDescription, ServerName};
pub use query::{Pagination, ServerPage, ServerQuery, SortKey, SortOrder};
pub use record::{NewServer, ServerRecord, ServerRecordData, ServerUpdate};
pub use status::ServerStatus;
