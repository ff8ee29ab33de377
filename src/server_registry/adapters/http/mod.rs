//! HTTP adapter for the remote fleet registry API.

mod client;
mod wire;

pub use client::{HttpRegistryError, HttpServerRegistry};
