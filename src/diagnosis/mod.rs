//! Shallow failure classification of runner output. The result only picks
//! the guidance block for the next repair prompt.

pub mod classifier;
pub mod guidance;

pub use classifier::{classify, FailureKind};
pub use guidance::guidance_for;
