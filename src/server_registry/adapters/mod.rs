//! Adapter implementations for the server registry port.

pub mod http;
pub mod memory;
