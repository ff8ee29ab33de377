//! Unit tests for active-server session state and selection.
