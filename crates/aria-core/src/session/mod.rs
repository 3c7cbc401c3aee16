//! Session domain module.
//!
//! The session gate owns the "is a user authenticated" state and decides
//! which of the two screens (auth panel vs. main application) is visible.
//! No other component may show the main application directly.
//!
//! # Module Structure
//!
//! - `model`: Session projection and gate state types (`Session`,
//!   `GateState`, `ScreenMode`, `GateEvent`)
//! - `gate`: The reactive state machine and its auth operations
//!   (`SessionGate`)

mod gate;
#[cfg(test)]
mod gate_test;
mod model;

pub use gate::SessionGate;
pub use model::{GateEvent, GateState, ScreenMode, Session};
