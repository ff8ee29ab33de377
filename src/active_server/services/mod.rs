//! Orchestration services for active-server selection.

mod selector;

pub use selector::{
    ActiveServerSelector, ClearOutcome, ReconcileOutcome, SelectionError, SelectionOutcome,
    SelectionResult,
};
