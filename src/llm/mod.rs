pub mod provider;
pub mod anthropic;
pub mod openai;
pub mod local;
pub mod router;
pub mod types;
pub mod oracle;
#[cfg(test)]
mod stub_endpoint;

pub use provider::LLMProvider;
pub use router::create_provider;
pub use types::LLMResponse;
pub use oracle::Oracle;
