//! Link-level error types.

use std::time::Duration;
use thiserror::Error;

/// Errors raised by a [`SerialPortAdapter`](super::SerialPortAdapter).
#[derive(Debug, Error)]
pub enum PortError {
    /// The named serial device does not exist.
    #[error("Serial port not found: {0}")]
    NotFound(String),

    /// Underlying read/write failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The port rejected its settings.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No data arrived within the poll window.
    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    /// Error reported by the `serialport` crate.
    #[error("Serial port error: {0}")]
    Serial(#[from] serialport::Error),
}

impl PortError {
    pub fn not_found(port_name: impl Into<String>) -> Self {
        Self::NotFound(port_name.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn timeout(duration: Duration) -> Self {
        Self::Timeout(duration)
    }

    /// True when the error only means "nothing to read right now".
    ///
    /// Both a poll timeout and a would-block read fall in this bucket; neither
    /// ends a receive cycle.
    pub fn is_quiet(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
            ),
            _ => false,
        }
    }
}
