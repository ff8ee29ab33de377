//! Orchestration services for server record management.

mod catalog;

pub use catalog::{
    CreateServerRequest, DeleteConfirmation, DeleteOutcome, ServerCatalogError,
    ServerCatalogResult, ServerCatalogService, UpdateServerRequest,
};
