//! Command/response exchange with the bridge board.
//!
//! Commands go out as raw strings with no terminator added. Responses have
//! no framing: a receive cycle streams whatever arrives into a [`Viewer`]
//! until the user closes it, then tells the board to `stop`.

use crate::config::SerialConfig;
use crate::port::{PortError, SerialPortAdapter};
use crate::text::decode_bytes;
use crate::ui::{UiError, Viewer};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, trace, warn};

/// Where control goes once a receive cycle ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceivePurpose {
    ReturnToMenu,
    ReturnToChat,
}

/// Errors that end a receive cycle early.
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error(transparent)]
    Port(#[from] PortError),

    #[error(transparent)]
    Ui(#[from] UiError),
}

/// Tunables for [`CommandChannel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelSettings {
    /// Bounded wait of each poll while the viewer is open.
    pub poll_timeout: Duration,
    /// Largest chunk taken in one poll.
    pub read_buffer_size: usize,
    /// Control word sent when a receive cycle ends.
    pub stop_word: String,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self::from(&SerialConfig::default())
    }
}

impl From<&SerialConfig> for ChannelSettings {
    fn from(config: &SerialConfig) -> Self {
        Self {
            poll_timeout: config.poll_timeout(),
            read_buffer_size: config.read_buffer_size.max(1),
            stop_word: config.stop_word.clone(),
        }
    }
}

/// Summary of one finished receive cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiveReport {
    pub purpose: ReceivePurpose,
    /// Polls made while the viewer was open.
    pub polls: usize,
    /// Non-empty chunks appended to the viewer.
    pub chunks: usize,
    pub bytes: usize,
    /// Bytes thrown away by the initial drain.
    pub discarded: usize,
}

/// Serial command channel over any [`SerialPortAdapter`].
#[derive(Debug)]
pub struct CommandChannel<P> {
    port: P,
    settings: ChannelSettings,
}

impl<P: SerialPortAdapter> CommandChannel<P> {
    pub fn new(port: P, settings: ChannelSettings) -> Self {
        Self { port, settings }
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn settings(&self) -> &ChannelSettings {
        &self.settings
    }

    pub fn into_port(self) -> P {
        self.port
    }

    /// Write `command` as-is. No retry, no acknowledgement.
    pub fn send(&mut self, command: &str) -> Result<(), PortError> {
        let written = self.port.write_bytes(command.as_bytes())?;
        if written < command.len() {
            warn!(
                "Short write on {}: {} of {} bytes",
                self.port.name(),
                written,
                command.len()
            );
        }
        debug!("Sent {} bytes on {}", written, self.port.name());
        Ok(())
    }

    /// Send `command`, then run a receive cycle.
    pub fn send_and_receive<V: Viewer + ?Sized>(
        &mut self,
        command: &str,
        purpose: ReceivePurpose,
        viewer: &mut V,
    ) -> Result<ReceiveReport, ChannelError> {
        self.send(command)?;
        self.receive(purpose, viewer)
    }

    /// Stream inbound data into `viewer` until the user closes it.
    ///
    /// Stale bytes are dropped by a zero-timeout read first. An empty poll is
    /// not an error and never ends the loop; only closing the viewer does.
    /// The stop word is always sent on the way out.
    pub fn receive<V: Viewer + ?Sized>(
        &mut self,
        purpose: ReceivePurpose,
        viewer: &mut V,
    ) -> Result<ReceiveReport, ChannelError> {
        info!("Receive cycle started ({:?})", purpose);
        viewer.open()?;

        let mut buffer = vec![0u8; self.settings.read_buffer_size];
        let discarded = self.drain(&mut buffer);
        self.port.set_timeout(self.settings.poll_timeout)?;

        let mut report = ReceiveReport {
            purpose,
            polls: 0,
            chunks: 0,
            bytes: 0,
            discarded,
        };

        while viewer.is_open()? {
            report.polls += 1;
            match self.port.read_bytes(&mut buffer) {
                Ok(0) => trace!("No data received"),
                Ok(n) => {
                    let text = decode_bytes(&buffer[..n]);
                    trace!("Received data: {:?}", text);
                    viewer.append(&text)?;
                    report.chunks += 1;
                    report.bytes += n;
                }
                Err(e) if e.is_quiet() => trace!("No data received"),
                Err(e) => {
                    // The transport is trusted to recover; keep polling at the usual pace.
                    warn!("Read error on {}: {}", self.port.name(), e);
                    std::thread::sleep(self.settings.poll_timeout);
                }
            }
        }

        let stop_word = self.settings.stop_word.clone();
        self.send(&stop_word)?;
        info!(
            "Receive cycle ended after {} polls, {} bytes",
            report.polls, report.bytes
        );
        Ok(report)
    }

    fn drain(&mut self, buffer: &mut [u8]) -> usize {
        if let Err(e) = self.port.set_timeout(Duration::ZERO) {
            warn!("Could not drop to a zero timeout for draining: {}", e);
            return 0;
        }
        match self.port.read_bytes(buffer) {
            Ok(n) => {
                if n > 0 {
                    debug!("Discarded {} stale bytes", n);
                }
                n
            }
            Err(e) if e.is_quiet() => 0,
            Err(e) => {
                warn!("Drain read failed: {}", e);
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::MockSerialPort;
    use crate::ui::{ScriptedUi, UiEvent};
    use pretty_assertions::assert_eq;

    fn channel(port: &MockSerialPort) -> CommandChannel<MockSerialPort> {
        CommandChannel::new(port.clone(), ChannelSettings::default())
    }

    #[test]
    fn test_send_writes_without_terminator() {
        let port = MockSerialPort::new("MOCK0");
        let mut ch = channel(&port);
        ch.send("Home").unwrap();
        assert_eq!(port.get_write_log(), vec![b"Home".to_vec()]);
    }

    #[test]
    fn test_empty_polls_do_not_end_the_cycle() {
        let mut port = MockSerialPort::new("MOCK0");
        port.enqueue_silence(); // drain
        port.enqueue_read(b"a");
        port.enqueue_silence();
        port.enqueue_silence();
        port.enqueue_read(b" b");

        let mut ui = ScriptedUi::new().keep_viewer_open(4);
        let report = channel(&port)
            .receive(ReceivePurpose::ReturnToMenu, &mut ui)
            .unwrap();

        assert_eq!(ui.appended(), vec!["a".to_string(), " b".to_string()]);
        assert_eq!(report.polls, 4);
        assert_eq!(report.chunks, 2);
        assert_eq!(report.bytes, 3);
        assert_eq!(port.written_commands(), vec!["stop".to_string()]);
    }

    #[test]
    fn test_drain_discards_stale_bytes() {
        let mut port = MockSerialPort::new("MOCK0");
        port.enqueue_read(b"old reply");
        port.enqueue_read(b"fresh");

        let mut ui = ScriptedUi::new().keep_viewer_open(1);
        let report = channel(&port)
            .receive(ReceivePurpose::ReturnToChat, &mut ui)
            .unwrap();

        assert_eq!(report.discarded, 9);
        assert_eq!(report.purpose, ReceivePurpose::ReturnToChat);
        assert_eq!(ui.appended(), vec!["fresh".to_string()]);
        assert_eq!(
            port.timeout_log(),
            vec![Duration::ZERO, Duration::from_millis(250)]
        );
    }

    #[test]
    fn test_closed_viewer_still_sends_stop() {
        let port = MockSerialPort::new("MOCK0");
        let mut ui = ScriptedUi::new();
        let report = channel(&port)
            .send_and_receive("hello", ReceivePurpose::ReturnToChat, &mut ui)
            .unwrap();

        assert_eq!(report.polls, 0);
        assert_eq!(
            port.written_commands(),
            vec!["hello".to_string(), "stop".to_string()]
        );
        assert_eq!(ui.events(), &[UiEvent::ViewerOpened, UiEvent::ViewerClosed]);
    }

    #[test]
    fn test_non_ascii_bytes_map_one_to_one() {
        let mut port = MockSerialPort::new("MOCK0");
        port.enqueue_silence();
        port.enqueue_read(&[0x48, 0xE9, 0x80]);

        let mut ui = ScriptedUi::new().keep_viewer_open(1);
        channel(&port)
            .receive(ReceivePurpose::ReturnToMenu, &mut ui)
            .unwrap();
        assert_eq!(ui.appended(), vec!["H\u{e9}\u{80}".to_string()]);
    }

    #[test]
    fn test_failed_stop_is_reported() {
        let mut port = MockSerialPort::new("MOCK0");
        port.fail_next_write();
        let mut ui = ScriptedUi::new();
        let result = channel(&port).receive(ReceivePurpose::ReturnToMenu, &mut ui);
        assert!(matches!(result, Err(ChannelError::Port(_))));
    }
}
