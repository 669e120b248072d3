//! TUI application state management.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::editor::EditorBuffer;
use crate::execution::ExecuteRequest;
use crate::language::Language;
use crate::notify::{Notification, Toasts};
use crate::runner::{self, RunOutcome, RunRejected};
use crate::session::{Action, SessionState};

/// Application state for the TUI
#[derive(Debug)]
pub struct App {
    /// Session state (source, language, output, flags)
    pub state: SessionState,
    /// Text buffer shown in the editor pane
    pub editor: EditorBuffer,
    /// Active notifications
    pub toasts: Toasts,
    /// Display time for new notifications
    pub toast_duration: Duration,
    /// Execution service base URL, shown in the status bar
    pub api_url: String,
    /// Status message to display
    pub status_message: String,
    /// Whether to show help
    pub show_help: bool,
    /// Lines scrolled down in the output pane
    pub output_scroll: u16,
    /// Frame counter driving the spinner
    pub tick: usize,
    /// Timestamp of last Ctrl+C press for double Ctrl+C detection
    pub last_ctrl_c_time: Option<Instant>,
}

impl App {
    pub fn new(state: SessionState, toast_duration: Duration, api_url: String) -> Self {
        let editor = EditorBuffer::from_text(&state.source_text);
        let mut app = Self {
            state,
            editor,
            toasts: Toasts::default(),
            toast_duration,
            api_url,
            status_message: String::new(),
            show_help: false,
            output_scroll: 0,
            tick: 0,
            last_ctrl_c_time: None,
        };
        app.update_status_message();
        app
    }

    pub fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = state.reduce(action);
    }

    /// Push the editor buffer into the session after an edit.
    pub fn sync_source(&mut self) {
        self.dispatch(Action::SetSourceText(self.editor.text()));
    }

    pub fn select_language(&mut self, language: Language) {
        if self.state.is_running {
            self.status_message = "Wait for the current run to finish".to_string();
            return;
        }
        self.dispatch(Action::SetLanguage(language));
        self.editor.set_text(&self.state.source_text);
        self.update_status_message();
    }

    pub fn next_language(&mut self) {
        self.select_language(self.state.language.next());
    }

    pub fn prev_language(&mut self) {
        self.select_language(self.state.language.prev());
    }

    /// Editor finished initialising; enables the run control.
    pub fn mark_editor_ready(&mut self) {
        self.dispatch(Action::MarkEditorReady);
        self.update_status_message();
    }

    /// Enter the running state and hand back the request to send.
    pub fn request_run(&mut self) -> Option<ExecuteRequest> {
        match runner::begin_run(&self.state) {
            Ok((state, request)) => {
                self.state = state;
                self.status_message = format!("Executing {}...", self.state.language.name());
                Some(request)
            }
            Err(RunRejected::EditorNotReady) => {
                self.status_message = "Editor is still loading".to_string();
                None
            }
            Err(RunRejected::AlreadyRunning) => {
                debug!("run key pressed while running");
                None
            }
        }
    }

    pub fn finish_run(&mut self, outcome: RunOutcome, now: Instant) {
        if let Some(notification) = outcome.notification() {
            self.notify(notification, now);
        }
        self.dispatch(Action::RunFinished(outcome));
        self.output_scroll = 0;
        self.update_status_message();
    }

    pub fn notify(&mut self, notification: Notification, now: Instant) {
        self.toasts
            .push(notification.with_duration(self.toast_duration), now);
    }

    /// Toggle help display
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn scroll_output_up(&mut self) {
        self.output_scroll = self.output_scroll.saturating_sub(1);
    }

    pub fn scroll_output_down(&mut self) {
        let lines = self.state.output_text.lines().count().saturating_sub(1);
        let max = u16::try_from(lines).unwrap_or(u16::MAX);
        if self.output_scroll < max {
            self.output_scroll += 1;
        }
    }

    pub fn run_label(&self) -> &'static str {
        if self.state.is_running {
            "Executing..."
        } else {
            "Run Code"
        }
    }

    fn update_status_message(&mut self) {
        self.status_message = if self.state.is_editor_ready {
            format!(
                "{} {} | Ctrl+R run | F2 language | F1 help",
                self.state.language.name(),
                self.state.language.descriptor().version
            )
        } else {
            "Loading editor... | F1 help".to_string()
        };
    }

    /// Handle Ctrl+C press and detect double press for quit
    /// Returns true if should quit (double Ctrl+C), false otherwise
    pub fn handle_ctrl_c(&mut self, now: Instant) -> bool {
        const DOUBLE_CTRL_C_TIMEOUT: Duration = Duration::from_millis(500);

        if let Some(last_time) = self.last_ctrl_c_time {
            if now.duration_since(last_time) <= DOUBLE_CTRL_C_TIMEOUT {
                self.last_ctrl_c_time = None;
                return true;
            }
        }

        self.status_message = "Press Ctrl+C again to quit".to_string();
        self.last_ctrl_c_time = Some(now);
        false
    }
}
