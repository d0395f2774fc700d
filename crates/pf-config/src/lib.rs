pub mod error;
pub mod paths;
pub mod settings;

pub use error::{ConfigError, Result};
pub use paths::{CONFIG_ENV, default_config_path, resolve_config_path};
pub use settings::{Settings, load_scenario};
