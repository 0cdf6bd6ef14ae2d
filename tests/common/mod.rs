//! Shared test utilities for the session and channel tests.
//!
//! - A [`Harness`] with a temporary data directory and a mock link
//! - Zero-delay session settings so flows run instantly
//! - Helpers for seeding and reading the data files

#![allow(dead_code)]

use ollama_remote::config::{SessionConfig, StorageConfig};
use ollama_remote::port::MockSerialPort;
use ollama_remote::ui::ScriptedUi;
use ollama_remote::{ChannelSettings, CommandChannel, DataFiles, SessionController, SessionError};
use std::time::Duration;
use tempfile::TempDir;

pub const SERVER_URL: &str = "http://192.168.1.20:11434";

/// Session settings with every pause disabled.
pub fn instant_session() -> SessionConfig {
    SessionConfig {
        settle_delay_ms: 0,
        credential_delay_ms: 0,
        ..SessionConfig::default()
    }
}

/// Channel settings with a short poll so hard read errors do not stall tests.
pub fn fast_channel() -> ChannelSettings {
    ChannelSettings {
        poll_timeout: Duration::from_millis(1),
        ..ChannelSettings::default()
    }
}

/// A temporary data directory plus a mock link to the bridge board.
pub struct Harness {
    pub dir: TempDir,
    pub files: DataFiles,
    pub port: MockSerialPort,
    pub session: SessionConfig,
}

impl Harness {
    /// Empty data directory; no server URL yet.
    pub fn empty() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let storage = StorageConfig {
            data_dir: Some(dir.path().to_path_buf()),
            ..StorageConfig::default()
        };
        Self {
            files: DataFiles::from_config(&storage),
            dir,
            port: MockSerialPort::new("MOCK0"),
            session: instant_session(),
        }
    }

    /// Data directory with the server URL already saved.
    pub fn new() -> Self {
        let harness = Self::empty();
        harness
            .files
            .server_url
            .write(&format!("{SERVER_URL}\n"))
            .expect("Failed to seed server URL");
        harness
    }

    pub fn with_saved_aps(self, contents: &str) -> Self {
        std::fs::write(self.files.aps.path(), contents).expect("Failed to seed saved APs");
        self
    }

    pub fn saved_aps(&self) -> Option<String> {
        std::fs::read_to_string(self.files.aps.path()).ok()
    }

    pub fn system_message(&self) -> Option<String> {
        self.files
            .system_message
            .read()
            .expect("Failed to read system message")
    }

    /// Run a whole session against `ui` and hand the surface back.
    pub fn run(&self, ui: ScriptedUi) -> (ScriptedUi, Result<(), SessionError>) {
        let channel = CommandChannel::new(self.port.clone(), fast_channel());
        let mut controller =
            SessionController::new(channel, ui, self.files.clone(), self.session.clone());
        let result = controller.run();
        let (_, ui) = controller.into_parts();
        (ui, result)
    }

    pub fn writes(&self) -> Vec<String> {
        self.port.written_commands()
    }
}

/// Build an expected write log: the server URL, `middle`, then the two stops
/// written when exit is confirmed (the command and its cycle's closing stop).
pub fn session_writes(middle: &[&str]) -> Vec<String> {
    std::iter::once(SERVER_URL)
        .chain(middle.iter().copied())
        .chain(["stop", "stop"])
        .map(str::to_string)
        .collect()
}
