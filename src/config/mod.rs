pub mod credentials;
pub mod parser;
pub mod schema;
pub mod security;
pub mod types;

pub use types::*;
pub use parser::{parse_config, validate_max_repairs, MAX_REPAIRS_LIMIT};
pub use credentials::{resolve_api_key, resolve_credential};
