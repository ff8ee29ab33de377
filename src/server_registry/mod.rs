//! Server record management against the remote fleet registry.
//!
//! This module implements the server registry client: listing, creating,
//! updating, status transitions, and deletion of server records, with
//! pagination, free-text search, and sorting. The module follows hexagonal
//! architecture:
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
