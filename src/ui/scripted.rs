//! Deterministic UI surface driven by queued answers.
//!
//! Every call is recorded as a [`UiEvent`] so tests can assert on exactly
//! what the user would have seen.

use super::{DialogChoice, MenuItem, TextPrompt, UiError, UiSurface, Viewer};
use std::collections::VecDeque;

/// Something the session showed or asked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Menu { header: String },
    Prompt { header: String },
    Message { header: String, text: String },
    ViewerOpened,
    Appended(String),
    ViewerClosed,
}

/// Scripted surface for tests and demos.
///
/// - menu answers run out as a dismissal (`None`)
/// - prompt answers running out is [`UiError::Closed`]
/// - dialog answers run out as [`DialogChoice::Ok`]
/// - each viewer opening takes the next poll budget: `is_open` answers
///   `true` that many times, then `false` (no budget means close at once)
#[derive(Debug, Default)]
pub struct ScriptedUi {
    menu_answers: VecDeque<Option<u32>>,
    prompt_answers: VecDeque<Option<String>>,
    dialog_answers: VecDeque<DialogChoice>,
    viewer_budgets: VecDeque<usize>,
    remaining_polls: Option<usize>,
    events: Vec<UiEvent>,
}

impl ScriptedUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(mut self, value: u32) -> Self {
        self.menu_answers.push_back(Some(value));
        self
    }

    pub fn dismiss_menu(mut self) -> Self {
        self.menu_answers.push_back(None);
        self
    }

    pub fn type_text(mut self, text: impl Into<String>) -> Self {
        self.prompt_answers.push_back(Some(text.into()));
        self
    }

    pub fn cancel_prompt(mut self) -> Self {
        self.prompt_answers.push_back(None);
        self
    }

    pub fn answer_dialog(mut self, choice: DialogChoice) -> Self {
        self.dialog_answers.push_back(choice);
        self
    }

    /// Keep the next viewer open for `polls` reads.
    pub fn keep_viewer_open(mut self, polls: usize) -> Self {
        self.viewer_budgets.push_back(polls);
        self
    }

    pub fn events(&self) -> &[UiEvent] {
        &self.events
    }

    /// Text appended to viewers, in order.
    pub fn appended(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::Appended(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// `(header, text)` of every message dialog.
    pub fn messages(&self) -> Vec<(String, String)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                UiEvent::Message { header, text } => Some((header.clone(), text.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn viewer_openings(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, UiEvent::ViewerOpened))
            .count()
    }

    pub fn prompts_left(&self) -> usize {
        self.prompt_answers.len()
    }
}

impl Viewer for ScriptedUi {
    fn open(&mut self) -> Result<(), UiError> {
        self.remaining_polls = Some(self.viewer_budgets.pop_front().unwrap_or(0));
        self.events.push(UiEvent::ViewerOpened);
        Ok(())
    }

    fn append(&mut self, text: &str) -> Result<(), UiError> {
        self.events.push(UiEvent::Appended(text.to_string()));
        Ok(())
    }

    fn is_open(&mut self) -> Result<bool, UiError> {
        match self.remaining_polls {
            Some(0) => {
                self.remaining_polls = None;
                self.events.push(UiEvent::ViewerClosed);
                Ok(false)
            }
            Some(n) => {
                self.remaining_polls = Some(n - 1);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl UiSurface for ScriptedUi {
    fn show_menu(&mut self, header: &str, _items: &[MenuItem]) -> Result<Option<u32>, UiError> {
        self.events.push(UiEvent::Menu {
            header: header.to_string(),
        });
        Ok(self.menu_answers.pop_front().flatten())
    }

    fn prompt_text(&mut self, prompt: &TextPrompt) -> Result<Option<String>, UiError> {
        self.events.push(UiEvent::Prompt {
            header: prompt.header.clone(),
        });
        self.prompt_answers.pop_front().ok_or(UiError::Closed)
    }

    fn message(&mut self, header: &str, text: &str) -> Result<DialogChoice, UiError> {
        self.events.push(UiEvent::Message {
            header: header.to_string(),
            text: text.to_string(),
        });
        Ok(self.dialog_answers.pop_front().unwrap_or(DialogChoice::Ok))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewer_budget_counts_polls() {
        let mut ui = ScriptedUi::new().keep_viewer_open(2);
        ui.open().unwrap();
        assert!(ui.is_open().unwrap());
        assert!(ui.is_open().unwrap());
        assert!(!ui.is_open().unwrap());
        assert!(!ui.is_open().unwrap());
        assert_eq!(
            ui.events(),
            &[UiEvent::ViewerOpened, UiEvent::ViewerClosed]
        );
    }

    #[test]
    fn test_answers_run_out() {
        let mut ui = ScriptedUi::new();
        assert_eq!(ui.show_menu("Menu", &[]).unwrap(), None);
        assert!(matches!(
            ui.prompt_text(&TextPrompt::new("Enter SSID", 100)),
            Err(UiError::Closed)
        ));
        assert_eq!(ui.message("Help", "hi").unwrap(), DialogChoice::Ok);
    }
}
