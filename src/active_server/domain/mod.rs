//! Domain model for the active-server reference.

mod change;
mod reference;

pub use change::ActiveServerChange;
pub use reference::{ActiveServerRef, ServerSnapshot};
