//! Custom event types for TUI application.

use crossterm::event::KeyEvent;

use crate::runner::RunOutcome;

/// Events that can occur in the TUI application
#[derive(Debug)]
pub enum TuiEvent {
    /// User keyboard input
    Key(KeyEvent),
    /// Bracketed paste content
    Paste(String),
    /// Terminal was resized
    Resize,
    /// Execution request resolved
    RunCompleted(RunOutcome),
}
