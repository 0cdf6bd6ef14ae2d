//! Full-screen terminal surface (ratatui + crossterm).
//!
//! Keys: arrows or `j`/`k` to move, Enter to choose, Esc to go back or
//! cancel. In the reply viewer, arrows scroll and Esc, Enter or `q` close it.

mod render;
mod terminal;
mod theme;

pub use terminal::TerminalUi;
pub use theme::{Theme, THEMES};
