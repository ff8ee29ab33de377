//! Active-server session state and selection.
//!
//! At most one server per organization is the current deployment target.
//! This module owns the client-side reference to that server: an explicit,
//! injected session-state object (not ambient global state), a selection
//! service enforcing deactivate-before-activate ordering against the
//! registry, and a publish/subscribe seam over which active-server changes
//! fan out to cache consumers. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Session state in [`session`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod session;

#[cfg(test)]
mod tests;
