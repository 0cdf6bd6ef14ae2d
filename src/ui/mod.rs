//! User interface surface.
//!
//! The session only needs four primitives: a menu of labelled integer
//! items, a single-line text prompt, a modal message, and a scrolling viewer
//! that the user closes. [`UiSurface`] captures them so the controller runs
//! unchanged on the full-screen terminal, on a plain console, or against
//! a scripted surface in tests.

mod console;
mod scripted;

pub use console::ConsoleUi;
pub use scripted::{ScriptedUi, UiEvent};

use thiserror::Error;

/// Errors from a UI surface. All of them end the session.
#[derive(Debug, Error)]
pub enum UiError {
    /// Terminal or stdio failure.
    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input source is gone (EOF, or a scripted run ran out of answers).
    #[error("User input closed")]
    Closed,
}

/// One selectable entry of a menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub value: u32,
}

impl MenuItem {
    pub fn new(label: impl Into<String>, value: u32) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A text prompt request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPrompt {
    pub header: String,
    pub default: String,
    pub max_len: usize,
}

impl TextPrompt {
    pub fn new(header: impl Into<String>, max_len: usize) -> Self {
        Self {
            header: header.into(),
            default: String::new(),
            max_len,
        }
    }
}

/// Button chosen on a message dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogChoice {
    Ok,
    Cancel,
}

/// Scrolling text viewer that streams a receive cycle.
///
/// Only the user closes it; `is_open` is polled between reads and is where
/// implementations pick up that key press.
pub trait Viewer {
    fn open(&mut self) -> Result<(), UiError>;

    fn append(&mut self, text: &str) -> Result<(), UiError>;

    fn is_open(&mut self) -> Result<bool, UiError>;
}

/// Menus, prompts and dialogs on top of a [`Viewer`].
pub trait UiSurface: Viewer {
    /// Show a menu; `None` when dismissed without a selection.
    fn show_menu(&mut self, header: &str, items: &[MenuItem]) -> Result<Option<u32>, UiError>;

    /// Ask for a line of text; `None` when cancelled.
    fn prompt_text(&mut self, prompt: &TextPrompt) -> Result<Option<String>, UiError>;

    /// Show a modal message and wait for the user to acknowledge it.
    fn message(&mut self, header: &str, text: &str) -> Result<DialogChoice, UiError>;
}

impl<U: UiSurface + ?Sized> Viewer for Box<U> {
    fn open(&mut self) -> Result<(), UiError> {
        (**self).open()
    }

    fn append(&mut self, text: &str) -> Result<(), UiError> {
        (**self).append(text)
    }

    fn is_open(&mut self) -> Result<bool, UiError> {
        (**self).is_open()
    }
}

impl<U: UiSurface + ?Sized> UiSurface for Box<U> {
    fn show_menu(&mut self, header: &str, items: &[MenuItem]) -> Result<Option<u32>, UiError> {
        (**self).show_menu(header, items)
    }

    fn prompt_text(&mut self, prompt: &TextPrompt) -> Result<Option<String>, UiError> {
        (**self).prompt_text(prompt)
    }

    fn message(&mut self, header: &str, text: &str) -> Result<DialogChoice, UiError> {
        (**self).message(header, text)
    }
}
