//! Session and application error types.

use crate::channel::ChannelError;
use crate::config::ConfigError;
use crate::port::PortError;
use crate::storage::StorageError;
use crate::ui::UiError;
use thiserror::Error;

/// Errors raised while handling a menu screen.
///
/// Link and storage failures are recoverable: the controller reports them
/// and returns to the main menu. A UI failure leaves nothing to report on
/// and ends the session.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Link error: {0}")]
    Port(#[from] PortError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("UI error: {0}")]
    Ui(#[from] UiError),
}

impl SessionError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Ui(_))
    }
}

impl From<ChannelError> for SessionError {
    fn from(err: ChannelError) -> Self {
        match err {
            ChannelError::Port(e) => Self::Port(e),
            ChannelError::Ui(e) => Self::Ui(e),
        }
    }
}

/// Top-level error for the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Could not open the serial link: {0}")]
    Port(#[from] PortError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Terminal setup failed: {0}")]
    Ui(#[from] UiError),

    #[error("No serial port configured; pass --port or set serial.port (see --list-ports)")]
    NoPortConfigured,

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_ui_errors_are_fatal() {
        assert!(SessionError::Ui(UiError::Closed).is_fatal());
        assert!(!SessionError::Port(PortError::config("bad")).is_fatal());
        assert!(!SessionError::Storage(StorageError::invalid_record("x")).is_fatal());
    }

    #[test]
    fn test_channel_error_mapping() {
        let err: SessionError = ChannelError::Ui(UiError::Closed).into();
        assert!(matches!(err, SessionError::Ui(UiError::Closed)));

        let err: SessionError = ChannelError::Port(PortError::not_found("COM4")).into();
        assert_eq!(err.to_string(), "Link error: Serial port not found: COM4");
    }
}
