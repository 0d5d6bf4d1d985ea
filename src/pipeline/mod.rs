//! Top-level `run_test`: precondition checks, initial generation, render,
//! then the repair loop.

pub mod config;
pub mod events;
pub mod orchestrator;
pub mod preconditions;
pub mod summary;

pub use config::PipelineConfig;
pub use events::{EventSink, LoopEvent};
pub use orchestrator::{RunnerFactory, TestPipeline, MISSING_CONTRACT_SOURCE};
pub use preconditions::check_environment;
pub use summary::{RunStatus, RunSummary};
