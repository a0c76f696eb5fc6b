//! Configuration for retrodesk.
//!
//! Reads `~/.retrodesk/config.toml` (or the file named by `RETRODESK_CONFIG`)
//! into a [`DesktopConfig`]. A missing default file is not an error: every
//! field has a default.

mod errors;
mod loader;
mod types;

pub use errors::ConfigError;
pub use loader::{config_file_path, load_config, load_config_from, validate_config};
pub use types::{DesktopConfig, StateConfig, ViewportConfig};
