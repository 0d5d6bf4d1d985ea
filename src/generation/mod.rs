//! Initial test generation. Exploit mode asks the oracle once for the two
//! template fragments; spec-violation mode first derives a formal
//! specification bundle and then asks for logic that breaks it.

pub mod bundle;
pub mod exploit;
pub mod generator;
pub mod spec_violation;

pub use bundle::{FormalSpecBundle, SpecItem};
pub use generator::{Generation, GenerationPlan, Generator};
pub use spec_violation::ViolationLogic;
