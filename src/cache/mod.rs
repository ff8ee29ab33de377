//! Cross-resource cache invalidation on active-server changes.
//!
//! Many resource domains (deployments, containers, file listings, audit
//! logs, …) cache results that are implicitly scoped to the current active
//! server. When the active server changes, every such cache must be marked
//! stale so the next read re-fetches. This module provides the tag
//! vocabulary, the store contract, and the coordinator that fans changes
//! out to subscribers. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
