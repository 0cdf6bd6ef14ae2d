//! Line-based console surface.
//!
//! Input lines are read on a background thread and handed over a channel, so
//! the viewer can check for the closing Enter without blocking the poll loop.

use super::{DialogChoice, MenuItem, TextPrompt, UiError, UiSurface, Viewer};
use std::io::{self, BufRead, BufReader, Write};
use std::sync::mpsc::{self, TryRecvError};
use std::thread;

/// Typed alone on a prompt line, cancels the prompt.
pub const CANCEL_TOKEN: &str = ":q";

/// Console surface over any line source and writer.
pub struct ConsoleUi<W: Write> {
    lines: mpsc::Receiver<String>,
    out: W,
    viewer_open: bool,
}

impl ConsoleUi<io::Stdout> {
    /// Console surface on the process's stdin/stdout.
    pub fn stdio() -> Self {
        Self::with_io(BufReader::new(io::stdin()), io::stdout())
    }
}

impl<W: Write> ConsoleUi<W> {
    pub fn with_io<R>(input: R, out: W) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (sender, lines) = mpsc::channel();
        thread::spawn(move || {
            for line in input.lines() {
                let Ok(line) = line else { break };
                if sender.send(line).is_err() {
                    break;
                }
            }
        });

        Self {
            lines,
            out,
            viewer_open: false,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    fn next_line(&mut self) -> Result<String, UiError> {
        let line = self.lines.recv().map_err(|_| UiError::Closed)?;
        Ok(line.trim_end_matches('\r').to_string())
    }

    fn ask(&mut self, label: &str) -> Result<String, UiError> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        self.next_line()
    }
}

impl<W: Write> Viewer for ConsoleUi<W> {
    fn open(&mut self) -> Result<(), UiError> {
        writeln!(self.out, "--- receiving (press Enter to close) ---")?;
        self.out.flush()?;
        self.viewer_open = true;
        Ok(())
    }

    fn append(&mut self, text: &str) -> Result<(), UiError> {
        write!(self.out, "{text}")?;
        self.out.flush()?;
        Ok(())
    }

    fn is_open(&mut self) -> Result<bool, UiError> {
        if !self.viewer_open {
            return Ok(false);
        }
        match self.lines.try_recv() {
            Err(TryRecvError::Empty) => Ok(true),
            Ok(_) | Err(TryRecvError::Disconnected) => {
                self.viewer_open = false;
                writeln!(self.out, "\n--- closed ---")?;
                Ok(false)
            }
        }
    }
}

impl<W: Write> UiSurface for ConsoleUi<W> {
    fn show_menu(&mut self, header: &str, items: &[MenuItem]) -> Result<Option<u32>, UiError> {
        writeln!(self.out, "\n== {header} ==")?;
        for item in items {
            writeln!(self.out, "  {}) {}", item.value, item.label)?;
        }
        loop {
            let line = self.ask("Select (empty to go back): ")?;
            let choice = line.trim();
            if choice.is_empty() {
                return Ok(None);
            }
            match choice.parse::<u32>() {
                Ok(value) if items.iter().any(|i| i.value == value) => return Ok(Some(value)),
                _ => writeln!(self.out, "Unknown choice '{choice}'")?,
            }
        }
    }

    fn prompt_text(&mut self, prompt: &TextPrompt) -> Result<Option<String>, UiError> {
        writeln!(self.out, "\n{} ({} to cancel)", prompt.header, CANCEL_TOKEN)?;
        let line = self.ask("> ")?;
        if line.trim() == CANCEL_TOKEN {
            return Ok(None);
        }
        let text = if line.is_empty() {
            prompt.default.clone()
        } else {
            line
        };
        Ok(Some(text.chars().take(prompt.max_len).collect()))
    }

    fn message(&mut self, header: &str, text: &str) -> Result<DialogChoice, UiError> {
        writeln!(self.out, "\n[{header}] {text}")?;
        let line = self.ask("OK [Enter] / Cancel [c]: ")?;
        Ok(match line.trim().to_ascii_lowercase().as_str() {
            "c" | "cancel" => DialogChoice::Cancel,
            _ => DialogChoice::Ok,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> ConsoleUi<Vec<u8>> {
        ConsoleUi::with_io(Cursor::new(input.to_string()), Vec::new())
    }

    fn items() -> Vec<MenuItem> {
        vec![MenuItem::new("Set your name", 0), MenuItem::new("Help", 3)]
    }

    #[test]
    fn test_menu_skips_unknown_choices() {
        let mut ui = console("7\n3\n");
        assert_eq!(ui.show_menu("Ollama IA", &items()).unwrap(), Some(3));
        let out = String::from_utf8(ui.into_output()).unwrap();
        assert!(out.contains("Unknown choice '7'"));
        assert!(out.contains("3) Help"));
    }

    #[test]
    fn test_menu_empty_line_dismisses() {
        let mut ui = console("\n");
        assert_eq!(ui.show_menu("Ollama IA", &items()).unwrap(), None);
    }

    #[test]
    fn test_prompt_cancel_and_truncate() {
        let mut ui = console(":q\nabcdefgh\r\n");
        assert_eq!(ui.prompt_text(&TextPrompt::new("Enter SSID", 4)).unwrap(), None);
        assert_eq!(
            ui.prompt_text(&TextPrompt::new("Enter SSID", 4)).unwrap(),
            Some("abcd".to_string())
        );
    }

    #[test]
    fn test_message_cancel() {
        let mut ui = console("c\n\n");
        assert_eq!(ui.message("Exit", "Press OK").unwrap(), DialogChoice::Cancel);
        assert_eq!(ui.message("Exit", "Press OK").unwrap(), DialogChoice::Ok);
    }

    #[test]
    fn test_input_end_is_closed() {
        let mut ui = console("");
        assert!(matches!(
            ui.prompt_text(&TextPrompt::new("Enter message", 100)),
            Err(UiError::Closed)
        ));
    }
}
