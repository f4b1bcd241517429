//! Configuration loading and CLI merging

mod loader;
mod merge;

pub use loader::{load_env_file, load_settings, Settings, CONFIG_FILE_NAME, ENV_PREFIX};
pub use merge::{merge_cli_with_settings, CliOverrides};
