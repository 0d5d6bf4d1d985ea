use clap::{Parser, Subcommand, Args};

#[derive(Parser)]
#[command(name = "gorilla", version, about = "LLM-driven Foundry test generation with automatic repair")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a test for an intent, run it and repair it until it passes
    Run(RunArgs),
    /// Check that a project is ready (runner installed, base template present)
    Check(CheckArgs),
    /// Write the built-in base template into a project
    InitTemplate(InitTemplateArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct RunArgs {
    /// Foundry project directory
    pub project: String,

    /// What the test should demonstrate, in plain language
    pub intent: String,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// LLM provider: openai, anthropic, local
    #[arg(long)]
    pub provider: Option<String>,

    /// LLM model identifier
    #[arg(long)]
    pub model: Option<String>,

    /// LLM API key (or use env vars)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Override the provider endpoint
    #[arg(long)]
    pub base_url: Option<String>,

    /// Maximum repair attempts after the first execution
    #[arg(long)]
    pub max_repairs: Option<u32>,

    /// Per-call oracle timeout in seconds
    #[arg(long)]
    pub oracle_timeout: Option<u64>,

    /// Do not write an audit trail
    #[arg(long)]
    pub no_audit: bool,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Clone)]
pub struct CheckArgs {
    /// Foundry project directory
    pub project: String,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,
}

#[derive(Args, Clone)]
pub struct InitTemplateArgs {
    /// Foundry project directory
    pub project: String,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Overwrite an existing base template
    #[arg(long)]
    pub force: bool,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
