//! Fleetdeck: administration core for SSH-accessible server fleets.
//!
//! This crate provides the client-side coordination layer of a multi-tenant
//! deployment platform: a registry client for managing remote server
//! records, session state tracking which server is currently "active", and
//! a cache-invalidation coordinator that marks per-server cached resources
//! stale whenever the active server changes.
//!
//! # Architecture
//!
//! Fleetdeck follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (HTTP API, in-memory)
//!
//! # Modules
//!
//! - [`server_registry`]: Server record CRUD against the remote registry
//! - [`active_server`]: Active-server session state and selection
//! - [`cache`]: Cross-resource cache invalidation on active-server changes
//! - [`config`]: Registry endpoint configuration

pub mod active_server;
pub mod cache;
pub mod config;
pub mod server_registry;
