//! Test suite for the cache invalidation module.

mod coordinator_tests;
