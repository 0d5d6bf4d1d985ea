pub mod commands;
pub mod check;
pub mod init_template;
pub mod renderer;
pub mod run;
pub mod validate;

pub use commands::{Cli, Commands};

use std::path::PathBuf;
use crate::config::{self, GorillaConfig};
use crate::errors::GorillaError;

/// Parse `--config` when given, otherwise use an all-defaults config.
pub(crate) async fn load_config(path: Option<&str>) -> Result<GorillaConfig, GorillaError> {
    match path {
        Some(p) => config::parse_config(&PathBuf::from(p)).await,
        None => Ok(GorillaConfig::default()),
    }
}
