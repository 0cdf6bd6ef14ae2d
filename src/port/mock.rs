//! Scripted in-memory link for tests and offline runs.
//!
//! Reads are served from a queue of chunks, one chunk per poll, so a test can
//! describe exactly what the bridge board "sends" in each poll window,
//! including silent windows. Clones share state, which lets a test keep a
//! handle while the controller owns the port.

use super::error::PortError;
use super::traits::SerialPortAdapter;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Default)]
struct MockPortState {
    /// Per-poll payloads; an empty entry is a silent poll window.
    read_queue: VecDeque<Vec<u8>>,
    /// Every write, in order.
    write_log: Vec<Vec<u8>>,
    /// Timeouts passed to `set_timeout`, in order.
    timeout_log: Vec<Duration>,
    timeout: Duration,
    /// Successful writes left before one fails.
    fail_after: Option<usize>,
    reads_attempted: usize,
}

/// Mock serial link.
///
/// ```
/// use ollama_remote::port::{MockSerialPort, SerialPortAdapter};
///
/// let mut port = MockSerialPort::new("MOCK0");
/// port.enqueue_read(b"hello");
/// port.enqueue_silence();
///
/// let mut buffer = [0u8; 16];
/// assert_eq!(port.read_bytes(&mut buffer).unwrap(), 5);
/// assert!(port.read_bytes(&mut buffer).is_err());
///
/// port.write_bytes(b"stop").unwrap();
/// assert_eq!(port.written_commands(), vec!["stop".to_string()]);
/// ```
#[derive(Clone)]
pub struct MockSerialPort {
    name: String,
    state: Arc<Mutex<MockPortState>>,
}

impl MockSerialPort {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Arc::new(Mutex::new(MockPortState {
                timeout: Duration::from_millis(250),
                ..Default::default()
            })),
        }
    }

    /// Queue one chunk to be returned by a single future read.
    ///
    /// An empty slice behaves like [`enqueue_silence`](Self::enqueue_silence).
    pub fn enqueue_read(&mut self, data: &[u8]) {
        self.state.lock().read_queue.push_back(data.to_vec());
    }

    /// Queue a poll window in which nothing arrives.
    pub fn enqueue_silence(&mut self) {
        self.state.lock().read_queue.push_back(Vec::new());
    }

    /// Raw bytes of every write.
    pub fn get_write_log(&self) -> Vec<Vec<u8>> {
        self.state.lock().write_log.clone()
    }

    /// Every write decoded as text, one entry per command.
    pub fn written_commands(&self) -> Vec<String> {
        self.state
            .lock()
            .write_log
            .iter()
            .map(|w| String::from_utf8_lossy(w).into_owned())
            .collect()
    }

    pub fn clear_write_log(&mut self) {
        self.state.lock().write_log.clear();
    }

    /// Timeouts the link was configured with, oldest first.
    pub fn timeout_log(&self) -> Vec<Duration> {
        self.state.lock().timeout_log.clone()
    }

    /// Make the next write fail with a broken pipe.
    pub fn fail_next_write(&mut self) {
        self.fail_write_after(0);
    }

    /// Let `successes` more writes through, then fail the one after.
    pub fn fail_write_after(&mut self, successes: usize) {
        self.state.lock().fail_after = Some(successes);
    }

    /// Number of read calls seen so far, including silent ones.
    pub fn reads_attempted(&self) -> usize {
        self.state.lock().reads_attempted
    }

    /// Chunks still waiting to be read.
    pub fn pending_chunks(&self) -> usize {
        self.state.lock().read_queue.len()
    }
}

impl SerialPortAdapter for MockSerialPort {
    fn write_bytes(&mut self, data: &[u8]) -> Result<usize, PortError> {
        let mut state = self.state.lock();
        match state.fail_after {
            Some(0) => {
                state.fail_after = None;
                return Err(PortError::Io(std::io::Error::new(
                    std::io::ErrorKind::BrokenPipe,
                    "mock link unplugged",
                )));
            }
            Some(n) => state.fail_after = Some(n - 1),
            None => {}
        }
        state.write_log.push(data.to_vec());
        Ok(data.len())
    }

    fn read_bytes(&mut self, buffer: &mut [u8]) -> Result<usize, PortError> {
        let mut state = self.state.lock();
        state.reads_attempted += 1;

        let Some(mut chunk) = state.read_queue.pop_front() else {
            return Err(PortError::timeout(state.timeout));
        };
        if chunk.is_empty() {
            return Err(PortError::timeout(state.timeout));
        }

        let n = chunk.len().min(buffer.len());
        buffer[..n].copy_from_slice(&chunk[..n]);
        if n < chunk.len() {
            // Leftover bytes are delivered by the next read.
            let rest = chunk.split_off(n);
            state.read_queue.push_front(rest);
        }
        Ok(n)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_timeout(&mut self, timeout: Duration) -> Result<(), PortError> {
        let mut state = self.state.lock();
        state.timeout = timeout;
        state.timeout_log.push(timeout);
        Ok(())
    }

    fn clear_buffers(&mut self) -> Result<(), PortError> {
        self.state.lock().read_queue.clear();
        Ok(())
    }

    fn bytes_to_read(&self) -> Option<usize> {
        Some(self.state.lock().read_queue.iter().map(Vec::len).sum())
    }
}

impl std::fmt::Debug for MockSerialPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockSerialPort")
            .field("name", &self.name)
            .field("pending_chunks", &self.pending_chunks())
            .finish()
    }
}
