//! Configuration loader with file resolution and environment override support.

use super::error::{ConfigError, ConfigResult};
use super::schema::Config;
use super::APP_NAME;
use std::path::{Path, PathBuf};

/// Environment variable prefix for overrides
const ENV_PREFIX: &str = "OLLAMA_REMOTE";

/// Config file name
const CONFIG_FILE_NAME: &str = "ollama-remote.toml";

/// Environment variable for explicit config path
const CONFIG_PATH_ENV: &str = "OLLAMA_REMOTE_CONFIG";

/// Configuration loader with resolution and override logic.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Resolved config file path (if any)
    pub config_path: Option<PathBuf>,
    /// The loaded configuration
    pub config: Config,
}

impl ConfigLoader {
    /// Load configuration using standard resolution order.
    ///
    /// Resolution priority (highest to lowest):
    /// 1. `OLLAMA_REMOTE_CONFIG` environment variable (explicit path)
    /// 2. `./ollama-remote.toml` (current directory)
    /// 3. `<platform config dir>/ollama-remote/ollama-remote.toml`
    /// 4. Built-in defaults (no file required)
    ///
    /// Environment variables override file values either way.
    pub fn load() -> ConfigResult<Self> {
        let config_path = resolve_config_path();

        let mut config = if let Some(ref path) = config_path {
            load_from_file(path)?
        } else {
            Config::default()
        };

        apply_env_overrides(&mut config)?;

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(ConfigError::NotFound(path));
        }
        let mut config = load_from_file(&path)?;
        apply_env_overrides(&mut config)?;

        Ok(Self {
            config_path: Some(path),
            config,
        })
    }

    /// Create a loader with default configuration (no file).
    pub fn with_defaults() -> Self {
        let mut config = Config::default();
        // Still apply env overrides even with defaults
        let _ = apply_env_overrides(&mut config);

        Self {
            config_path: None,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }

    /// Save the current configuration to a specific file.
    pub fn save_to(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        save_to_file(&self.config, path.as_ref())
    }
}

/// Resolve the configuration file path using standard locations.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let cwd_config = PathBuf::from(CONFIG_FILE_NAME);
    if cwd_config.exists() {
        return Some(cwd_config);
    }

    get_default_config_path().filter(|path| path.exists())
}

/// Platform config directory for this application.
pub fn get_default_config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Default config file path, for writing a fresh config.
pub fn get_default_config_path() -> Option<PathBuf> {
    get_default_config_dir().map(|d| d.join(CONFIG_FILE_NAME))
}

fn load_from_file(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&content).map_err(ConfigError::ParseError)
}

fn save_to_file(config: &Config, path: &Path) -> ConfigResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

fn env_var(key: &str) -> Option<(String, String)> {
    let name = format!("{}_{}", ENV_PREFIX, key);
    std::env::var(&name).ok().map(|val| (name, val))
}

fn parse_env<T: std::str::FromStr>(name: &str, val: &str, what: &str) -> ConfigResult<T> {
    val.trim()
        .parse()
        .map_err(|_| ConfigError::env_parse(name, format!("Invalid {what}: '{val}'")))
}

fn parse_bool(val: &str) -> bool {
    val.eq_ignore_ascii_case("true") || val == "1"
}

/// Apply environment variable overrides to the configuration.
///
/// Environment variables follow the pattern `OLLAMA_REMOTE_<SECTION>_<KEY>`,
/// for example `OLLAMA_REMOTE_SERIAL_PORT=/dev/ttyACM0`.
fn apply_env_overrides(config: &mut Config) -> ConfigResult<()> {
    // Serial overrides
    if let Some((_, val)) = env_var("SERIAL_PORT") {
        config.serial.port = Some(val);
    }
    if let Some((name, val)) = env_var("SERIAL_BAUD") {
        config.serial.baud = parse_env(&name, &val, "baud rate")?;
    }
    if let Some((name, val)) = env_var("SERIAL_POLL_TIMEOUT_MS") {
        config.serial.poll_timeout_ms = parse_env(&name, &val, "timeout")?;
    }

    // Storage overrides
    if let Some((_, val)) = env_var("STORAGE_DATA_DIR") {
        config.storage.data_dir = Some(PathBuf::from(val));
    }

    // Session overrides
    if let Some((name, val)) = env_var("SESSION_SETTLE_DELAY_MS") {
        config.session.settle_delay_ms = parse_env(&name, &val, "delay")?;
    }
    if let Some((name, val)) = env_var("SESSION_CREDENTIAL_DELAY_MS") {
        config.session.credential_delay_ms = parse_env(&name, &val, "delay")?;
    }
    if let Some((_, val)) = env_var("SESSION_SEND_API_KEY") {
        config.session.send_api_key = parse_bool(&val);
    }

    // Logging overrides
    if let Some((_, val)) = env_var("LOGGING_LEVEL") {
        config.logging.level = val;
    }
    if let Some((_, val)) = env_var("LOGGING_FILE") {
        config.logging.file = Some(PathBuf::from(val));
    }

    // TUI overrides
    if let Some((_, val)) = env_var("TUI_THEME") {
        config.tui.theme = val;
    }

    validate(config)
}

fn validate(config: &Config) -> ConfigResult<()> {
    if config.serial.baud == 0 {
        return Err(ConfigError::validation("serial.baud", "must be non-zero"));
    }
    if config.serial.read_buffer_size == 0 {
        return Err(ConfigError::validation(
            "serial.read_buffer_size",
            "must be non-zero",
        ));
    }
    if config.serial.stop_word.trim().is_empty() {
        return Err(ConfigError::validation("serial.stop_word", "must not be empty"));
    }
    Ok(())
}
