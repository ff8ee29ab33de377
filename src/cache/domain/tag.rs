//! Cache tag vocabulary.
//!
//! A tag identifies one cached result set: a resource domain plus the
//! scope of the cached data within it. Invalidating a tag marks the
//! cached set stale; consumers clear their tag again once they re-fetch.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Resource domains whose cached results are scoped to the active server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheDomain {
    /// Authentication and token state.
    Authentication,
    /// The signed-in user's profile.
    UserProfile,
    /// Notification preferences and feeds.
    Notifications,
    /// Managed DNS domain records.
    DomainRecords,
    /// The server listing itself.
    Servers,
    /// Source-control connector state.
    SourceControl,
    /// Deployment and application records.
    Deployments,
    /// Remote file listings.
    FileManager,
    /// Audit log entries.
    AuditLogs,
    /// Feature flag evaluations.
    FeatureFlags,
    /// Container listings.
    Containers,
    /// Container image listings.
    ContainerImages,
}

impl CacheDomain {
    /// Every resource domain, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Authentication,
        Self::UserProfile,
        Self::Notifications,
        Self::DomainRecords,
        Self::Servers,
        Self::SourceControl,
        Self::Deployments,
        Self::FileManager,
        Self::AuditLogs,
        Self::FeatureFlags,
        Self::Containers,
        Self::ContainerImages,
    ];

    /// Returns the canonical tag-name representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Authentication => "authentication",
            Self::UserProfile => "user_profile",
            Self::Notifications => "notifications",
            Self::DomainRecords => "domain_records",
            Self::Servers => "servers",
            Self::SourceControl => "source_control",
            Self::Deployments => "deployments",
            Self::FileManager => "file_manager",
            Self::AuditLogs => "audit_logs",
            Self::FeatureFlags => "feature_flags",
            Self::Containers => "containers",
            Self::ContainerImages => "container_images",
        }
    }
}

impl fmt::Display for CacheDomain {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Scope of a cached result set within its domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagScope {
    /// The domain's listing cache.
    List,
    /// The cached answer to "which server is active".
    ActiveServer,
}

/// One cached result set: a domain plus a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CacheTag {
    /// Resource domain.
    pub domain: CacheDomain,
    /// Scope within the domain.
    pub scope: TagScope,
}

impl CacheTag {
    /// Creates a listing tag for a domain.
    #[must_use]
    pub const fn list(domain: CacheDomain) -> Self {
        Self {
            domain,
            scope: TagScope::List,
        }
    }

    /// Creates the active-server tag of the server domain.
    #[must_use]
    pub const fn active_server() -> Self {
        Self {
            domain: CacheDomain::Servers,
            scope: TagScope::ActiveServer,
        }
    }

    /// Returns the full set of tags one invalidation sweep marks stale:
    /// every domain's listing tag plus the active-server tag.
    #[must_use]
    pub fn sweep() -> Vec<Self> {
        let mut tags: Vec<Self> = CacheDomain::ALL.into_iter().map(Self::list).collect();
        tags.push(Self::active_server());
        tags
    }
}

impl fmt::Display for CacheTag {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scope {
            TagScope::List => write!(formatter, "{}:list", self.domain),
            TagScope::ActiveServer => write!(formatter, "{}:active", self.domain),
        }
    }
}
