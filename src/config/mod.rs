//! TOML configuration with environment variable overrides.
//!
//! # Configuration Resolution
//!
//! 1. `OLLAMA_REMOTE_CONFIG` environment variable (explicit path)
//! 2. `./ollama-remote.toml` (current directory)
//! 3. `<platform config dir>/ollama-remote/ollama-remote.toml`
//! 4. Built-in defaults (no file required)
//!
//! # Environment Overrides
//!
//! The pattern is `OLLAMA_REMOTE_<SECTION>_<KEY>`, e.g.
//! `OLLAMA_REMOTE_SERIAL_PORT=/dev/ttyUSB0` or
//! `OLLAMA_REMOTE_SESSION_SETTLE_DELAY_MS=0`.
//!
//! # Example
//!
//! ```toml
//! [serial]
//! port = "/dev/ttyUSB0"
//!
//! [storage]
//! data_dir = "/ext/apps_data/ollama_ia"
//! ```

mod error;
mod loader;
mod schema;

/// Directory and project name used for platform paths.
pub const APP_NAME: &str = "ollama-remote";

pub use error::{ConfigError, ConfigResult};
pub use loader::{
    get_default_config_dir, get_default_config_path, resolve_config_path, ConfigLoader,
};
pub use schema::{
    Config, LogFormat, LoggingConfig, SerialConfig, SessionConfig, StorageConfig, TuiConfig,
};
