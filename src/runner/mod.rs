//! The run action: build a request from the session, await one response, fold the result back.

use thiserror::Error;
use tracing::{info, warn};

use crate::execution::{ExecuteRequest, Executor};
use crate::notify::Notification;
use crate::session::{Action, SessionState};

/// Recorded when the service answers without any run output.
pub const NO_OUTPUT: &str = "No output";
/// Recorded when the request fails for any reason.
pub const EXECUTION_FAILED: &str = "Error executing code";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Output(String),
    Failed { message: String },
}

impl RunOutcome {
    /// Text for the output panel.
    pub fn output_text(&self) -> &str {
        match self {
            RunOutcome::Output(text) => text,
            RunOutcome::Failed { .. } => EXECUTION_FAILED,
        }
    }

    pub fn notification(&self) -> Option<Notification> {
        match self {
            RunOutcome::Output(_) => None,
            RunOutcome::Failed { message } => {
                Some(Notification::execution_error(message.clone()))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RunRejected {
    #[error("the editor is not ready yet")]
    EditorNotReady,
    /// A second run while one is outstanding is ignored.
    #[error("a run is already in progress")]
    AlreadyRunning,
}

/// Final state of a completed run plus the toast to show, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub state: SessionState,
    pub notification: Option<Notification>,
}

/// Move the session into the running state and build the request for it.
pub fn begin_run(state: &SessionState) -> Result<(SessionState, ExecuteRequest), RunRejected> {
    if !state.is_editor_ready {
        warn!("run requested before the editor was ready");
        return Err(RunRejected::EditorNotReady);
    }
    if state.is_running {
        warn!("run requested while another run is in flight; ignoring");
        return Err(RunRejected::AlreadyRunning);
    }
    let request = ExecuteRequest::new(state.language, state.source_text.clone());
    let next = state.clone().reduce(Action::SetRunning(true));
    Ok((next, request))
}

/// Await exactly one response from `executor`. Never retries.
pub async fn execute<E: Executor>(executor: &E, request: ExecuteRequest) -> RunOutcome {
    match executor.execute(&request).await {
        Ok(resp) => {
            let output = resp.run_output().unwrap_or(NO_OUTPUT).to_string();
            info!(language = %request.language, bytes = output.len(), "run finished");
            RunOutcome::Output(output)
        }
        Err(e) => {
            warn!(language = %request.language, error = %e, "run failed");
            RunOutcome::Failed {
                message: e.to_string(),
            }
        }
    }
}

/// Full run cycle against `state`; the returned state is always idle.
pub async fn run_once<E: Executor>(
    executor: &E,
    state: &SessionState,
) -> Result<RunReport, RunRejected> {
    let (running, request) = begin_run(state)?;
    let outcome = execute(executor, request).await;
    let notification = outcome.notification();
    Ok(RunReport {
        state: running.reduce(Action::RunFinished(outcome)),
        notification,
    })
}
