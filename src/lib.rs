//! Ollama Remote Library
//!
//! Menu-driven remote control for a serial bridge board that provisions
//! Wi-Fi access points and relays chat messages to an Ollama server.
//!
//! # Modules
//!
//! - `text`: Whitespace normalization and link byte decoding
//! - `storage`: Saved access point list and single-value text files
//! - `port`: Link abstraction (hardware port and mock)
//! - `channel`: Send/receive exchange with the bridge board
//! - `session`: Menu state machine
//! - `ui`: User interface surface (console and scripted)
//! - `config`: Configuration management with TOML support
//! - `logging`: Tracing subscriber setup
//! - `error`: Session and application errors
//! - `tui`: Full-screen terminal surface (when `tui` feature is enabled)

pub mod channel;
pub mod config;
pub mod error;
pub mod logging;
pub mod port;
pub mod session;
pub mod storage;
pub mod text;
pub mod ui;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export commonly used types for convenience
pub use channel::{ChannelError, ChannelSettings, CommandChannel, ReceivePurpose, ReceiveReport};
pub use error::{AppError, SessionError};
pub use port::{MockSerialPort, PortConfiguration, PortError, SerialPortAdapter, SyncSerialPort};
pub use session::{Flow, Screen, SessionController, SessionMode};
pub use storage::{ApEntry, ApRecord, ApStore, DataFiles, StorageError, TextFile};
pub use ui::{DialogChoice, MenuItem, TextPrompt, UiError, UiSurface, Viewer};
