//! Core link trait and settings.

use super::error::PortError;
use std::time::Duration;

/// Baud rate the bridge firmware listens on.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Settings used when opening the link.
///
/// The bridge board always speaks 8N1 without flow control, so only the
/// rate and the initial read timeout are configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortConfiguration {
    /// Baud rate (bits per second).
    pub baud_rate: u32,

    /// Initial read timeout; the receive loop adjusts it per poll.
    pub timeout: Duration,
}

impl Default for PortConfiguration {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            timeout: Duration::from_millis(250),
        }
    }
}

/// Byte-level access to the serial link.
///
/// Implemented by [`SyncSerialPort`](super::SyncSerialPort) for hardware and
/// [`MockSerialPort`](super::MockSerialPort) for tests.
pub trait SerialPortAdapter: Send + std::fmt::Debug {
    /// Write bytes to the link, returning how many were accepted.
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize, PortError>;

    /// Read whatever is available into `buffer`, waiting at most the current timeout.
    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, PortError>;

    /// Name/path of the link.
    fn name(&self) -> &str;

    /// Set how long a read may wait for data.
    fn set_timeout(&mut self, timeout: Duration) -> Result<(), PortError>;

    /// Discard pending input and output.
    fn clear_buffers(&mut self) -> Result<(), PortError>;

    /// Bytes waiting in the receive buffer, if the backend can tell.
    fn bytes_to_read(&self) -> Option<usize> {
        None
    }
}

impl<P: SerialPortAdapter + ?Sized> SerialPortAdapter for Box<P> {
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize, PortError> {
        (**self).write_bytes(data)
    }

    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, PortError> {
        (**self).read_bytes(buffer)
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn set_timeout(&mut self, timeout: Duration) -> Result<(), PortError> {
        (**self).set_timeout(timeout)
    }

    fn clear_buffers(&mut self) -> Result<(), PortError> {
        (**self).clear_buffers()
    }

    fn bytes_to_read(&self) -> Option<usize> {
        (**self).bytes_to_read()
    }
}
