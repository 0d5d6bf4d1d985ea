//! Bounded repair loop: execute, diagnose, ask for a corrected artifact,
//! repeat until the runner passes, the attempt budget runs out, or a repair
//! makes no change.

pub mod attempt;
pub mod context;
pub mod decision;
pub mod driver;

pub use attempt::{Attempt, RepairReport};
pub use context::project_context;
pub use decision::{is_unproductive, next_step, ExhaustReason, NextStep, RepairOutcome};
pub use driver::{RepairDriver, DEFAULT_MAX_REPAIRS};
