//! Configuration schema definitions.
//!
//! Every section has serde defaults, so a partial file (or none at all)
//! still yields a usable configuration.

use crate::port::DEFAULT_BAUD_RATE;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Serial link settings
    pub serial: SerialConfig,
    /// Where the flat files live
    pub storage: StorageConfig,
    /// Menu flow timing and behaviour
    pub session: SessionConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Terminal UI configuration
    pub tui: TuiConfig,
}

/// Serial link configuration section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Device path of the bridge board (e.g. `/dev/ttyUSB0`, `COM4`)
    pub port: Option<String>,
    /// Baud rate
    pub baud: u32,
    /// Per-poll wait while a receive cycle is open
    pub poll_timeout_ms: u64,
    /// Largest chunk read in one poll
    pub read_buffer_size: usize,
    /// Control word sent after every receive cycle
    pub stop_word: String,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: None,
            baud: DEFAULT_BAUD_RATE,
            poll_timeout_ms: 250,
            read_buffer_size: 1024,
            stop_word: "stop".to_string(),
        }
    }
}

impl SerialConfig {
    pub fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }
}

/// Storage configuration section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Base directory; the platform data directory when unset
    pub data_dir: Option<PathBuf>,
    pub saved_aps_file: PathBuf,
    pub server_url_file: PathBuf,
    pub system_message_file: PathBuf,
    pub api_key_file: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            saved_aps_file: PathBuf::from("SavedAPs.txt"),
            server_url_file: PathBuf::from("server_url.txt"),
            system_message_file: PathBuf::from("system_string.txt"),
            api_key_file: PathBuf::from("key.txt"),
        }
    }
}

impl StorageConfig {
    /// The configured data directory, else the platform one, else `./ollama-remote`.
    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.data_dir {
            return dir.clone();
        }
        directories::ProjectDirs::from("", "", super::APP_NAME)
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(super::APP_NAME))
    }
}

/// Session (menu flow) configuration section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Pause after sending the user's name, before the AP summary
    pub settle_delay_ms: u64,
    /// Pause after each credential write
    pub credential_delay_ms: u64,
    /// Send the API key file right after the server URL on start-up
    pub send_api_key: bool,
    /// Header shown above the main menu
    pub menu_header: String,
    /// Longest text a prompt accepts
    pub prompt_max_len: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 5000,
            credential_delay_ms: 500,
            send_api_key: false,
            menu_header: "Ollama IA".to_string(),
            prompt_max_len: 100,
        }
    }
}

impl SessionConfig {
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn credential_delay(&self) -> Duration {
        Duration::from_millis(self.credential_delay_ms)
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level filter used when `RUST_LOG` is unset
    pub level: String,
    /// Log file path (optional)
    pub file: Option<PathBuf>,
    /// Log format: "json", "pretty", "compact"
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            format: LogFormat::Compact,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
    #[default]
    Compact,
}

/// TUI configuration section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Theme name: "dark", "light", "mono"
    pub theme: String,
    /// How long a blocking screen waits for a key before redrawing
    pub tick_rate_ms: u64,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            tick_rate_ms: 50,
        }
    }
}

impl TuiConfig {
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }
}
