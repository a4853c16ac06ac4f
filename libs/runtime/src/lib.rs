//! Process-level plumbing shared by cookbook binaries: layered configuration
//! and `tracing` initialization.

pub mod config;
mod home_dir;
pub mod logging;

pub use config::{AppConfig, CliArgs, DatabaseConfig, LoggingConfig, Section, ServerConfig};
pub use home_dir::resolve_home_dir;
pub use logging::init_logging_from_config;
