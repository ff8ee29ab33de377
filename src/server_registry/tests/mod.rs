//! Unit tests for the server registry module.

mod memory_registry_tests;
