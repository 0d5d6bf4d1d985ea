//! Generate, execute, diagnose and repair Foundry tests for a smart
//! contract from a plain-language intent, using an LLM as the code oracle.

pub mod audit;
pub mod cli;
pub mod config;
pub mod diagnosis;
pub mod errors;
pub mod generation;
pub mod intent;
pub mod llm;
pub mod parser;
pub mod pipeline;
pub mod prompts;
pub mod repair;
pub mod runner;
pub mod template;
pub mod utils;

pub use errors::GorillaError;
pub use pipeline::{PipelineConfig, RunSummary, TestPipeline};
