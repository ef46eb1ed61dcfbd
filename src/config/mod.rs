//! TOML configuration: initial option selection and fetch settings.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{ApiConfig, Config, Defaults};
