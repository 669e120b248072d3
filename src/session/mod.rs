//! Session state of one open editor and the reducer that drives it.

use tracing::debug;

use crate::language::Language;
use crate::runner::RunOutcome;

/// Source text shown before the user picks a language.
pub const INITIAL_SOURCE: &str = "// Write your code here";

/// In-memory state of one editor view. Discarded when the view exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub source_text: String,
    pub language: Language,
    pub output_text: String,
    pub is_running: bool,
    pub is_editor_ready: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            source_text: INITIAL_SOURCE.to_string(),
            language: Language::JavaScript,
            output_text: String::new(),
            is_running: false,
            is_editor_ready: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetSourceText(String),
    /// Switch language and load its placeholder snippet.
    SetLanguage(Language),
    MarkEditorReady,
    RecordOutput(String),
    SetRunning(bool),
    /// Record the result of a run and return to idle.
    RunFinished(RunOutcome),
}

impl SessionState {
    /// Start a session with the given language and source instead of the defaults.
    pub fn with_source(language: Language, source_text: impl Into<String>) -> Self {
        Self {
            source_text: source_text.into(),
            language,
            ..Self::default()
        }
    }

    /// Apply one action and return the next state.
    pub fn reduce(self, action: Action) -> Self {
        match action {
            Action::SetSourceText(source_text) => Self { source_text, ..self },
            Action::SetLanguage(language) => {
                debug!(language = %language, "language selected");
                Self {
                    source_text: language.placeholder().to_string(),
                    language,
                    ..self
                }
            }
            Action::MarkEditorReady => Self {
                is_editor_ready: true,
                ..self
            },
            Action::RecordOutput(output_text) => Self { output_text, ..self },
            Action::SetRunning(is_running) => Self { is_running, ..self },
            Action::RunFinished(outcome) => Self {
                output_text: outcome.output_text().to_string(),
                is_running: false,
                ..self
            },
        }
    }

    /// Whether the run control accepts input.
    pub fn can_run(&self) -> bool {
        self.is_editor_ready && !self.is_running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_fresh_view() {
        let state = SessionState::default();
        assert_eq!(state.language, Language::JavaScript);
        assert_eq!(state.source_text, "// Write your code here");
        assert!(state.output_text.is_empty());
        assert!(!state.is_running);
        assert!(!state.is_editor_ready);
        assert!(!state.can_run());
    }

    #[test]
    fn selecting_language_resets_source_to_snippet() {
        for lang in Language::ALL {
            let state = SessionState::default()
                .reduce(Action::SetSourceText("edited".into()))
                .reduce(Action::SetLanguage(lang));
            assert_eq!(state.language, lang);
            assert_eq!(state.source_text, lang.placeholder());
        }

        let java = SessionState::default().reduce(Action::SetLanguage(Language::Java));
        assert_eq!(
            java.source_text,
            "public class Main {\n    public static void main(String[] args) {\n        System.out.println(\"Hello World!\");\n    }\n}"
        );
        let py = SessionState::default().reduce(Action::SetLanguage(Language::Python));
        assert_eq!(py.source_text, "# Write your Python code here\nprint(\"Hello World!\")");
        let js = SessionState::default().reduce(Action::SetLanguage(Language::JavaScript));
        assert_eq!(
            js.source_text,
            "// Write your JavaScript code here\nconsole.log(\"Hello World!\");"
        );
    }

    #[test]
    fn set_source_text_keeps_other_fields() {
        let state = SessionState::default()
            .reduce(Action::MarkEditorReady)
            .reduce(Action::RecordOutput("out".into()))
            .reduce(Action::SetSourceText(String::new()));
        assert_eq!(state.source_text, "");
        assert_eq!(state.output_text, "out");
        assert!(state.is_editor_ready);
    }

    #[test]
    fn record_output_is_idempotent() {
        let once = SessionState::default().reduce(Action::RecordOutput("42\n".into()));
        let twice = once.clone().reduce(Action::RecordOutput("42\n".into()));
        assert_eq!(once, twice);
    }

    #[test]
    fn editor_ready_gates_running() {
        let ready = SessionState::default().reduce(Action::MarkEditorReady);
        assert!(ready.can_run());
        assert_eq!(ready.clone().reduce(Action::MarkEditorReady), ready);

        let busy = ready.reduce(Action::SetRunning(true));
        assert!(!busy.can_run());
    }

    #[test]
    fn run_finished_returns_to_idle() {
        let state = SessionState::default()
            .reduce(Action::MarkEditorReady)
            .reduce(Action::SetRunning(true))
            .reduce(Action::RunFinished(RunOutcome::Failed {
                message: "boom".into(),
            }));
        assert!(!state.is_running);
        assert_eq!(state.output_text, "Error executing code");
    }
}
