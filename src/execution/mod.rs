//! Execution service protocol: request/response types, error kinds and the executor seam.

use std::future::Future;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::language::Language;

pub mod piston;

pub use piston::PistonClient;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub content: String,
}

/// Body of `POST /execute`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteRequest {
    pub language: String,
    pub version: String,
    pub files: Vec<SourceFile>,
}

impl ExecuteRequest {
    pub fn new(language: Language, source: impl Into<String>) -> Self {
        let desc = language.descriptor();
        Self {
            language: desc.id.to_string(),
            version: desc.version.to_string(),
            files: vec![SourceFile {
                content: source.into(),
            }],
        }
    }
}

/// Body of a successful `POST /execute`, kept as raw JSON.
///
/// Only `run.output` is read; any other shape, including mistyped fields,
/// reads as "no output" rather than failing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ExecuteResponse(Value);

impl From<Value> for ExecuteResponse {
    fn from(body: Value) -> Self {
        Self(body)
    }
}

impl ExecuteResponse {
    /// Combined output of the run stage, if the service reported any.
    pub fn run_output(&self) -> Option<&str> {
        self.0
            .pointer("/run/output")
            .and_then(Value::as_str)
            .filter(|o| !o.is_empty())
    }

    /// Exit code of the run stage, when it is an integer.
    pub fn exit_code(&self) -> Option<i64> {
        self.0.pointer("/run/code").and_then(Value::as_i64)
    }
}

/// Entry of `GET /runtimes`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Runtime {
    pub language: String,
    pub version: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub runtime: Option<String>,
}

#[derive(Debug, Error)]
pub enum ExecError {
    /// Connection, DNS, TLS or timeout failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Request failed with status code {status}{}", status_detail(.message))]
    HttpStatus { status: u16, message: Option<String> },

    #[error("Malformed response body: {0}")]
    Parse(#[from] serde_json::Error),
}

fn status_detail(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

/// Anything able to run an [`ExecuteRequest`] to completion.
pub trait Executor {
    fn execute(
        &self,
        request: &ExecuteRequest,
    ) -> impl Future<Output = Result<ExecuteResponse, ExecError>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_service_shape() {
        let req = ExecuteRequest::new(Language::JavaScript, "console.log(1)");
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "language": "javascript",
                "version": "18.15.0",
                "files": [{ "content": "console.log(1)" }]
            })
        );
    }

    fn output_of(body: &str) -> Option<String> {
        serde_json::from_str::<ExecuteResponse>(body)
            .unwrap()
            .run_output()
            .map(str::to_string)
    }

    #[test]
    fn response_tolerates_missing_fields() {
        assert_eq!(output_of(r#"{"language":"python"}"#), None);
        assert_eq!(output_of(r#"{"run":{"stdout":"","stderr":"","code":0}}"#), None);
        assert_eq!(
            output_of(r#"{"run":{"output":"Hello World!\n","code":0,"signal":null}}"#).as_deref(),
            Some("Hello World!\n")
        );
    }

    #[test]
    fn response_ignores_mistyped_fields() {
        assert_eq!(
            output_of(r#"{"run":{"output":"hi\n","code":"0"}}"#).as_deref(),
            Some("hi\n")
        );
        assert_eq!(
            output_of(r#"{"run":{"output":"hi"},"version":3}"#).as_deref(),
            Some("hi")
        );
        assert_eq!(output_of(r#"{"run":"oops"}"#), None);
        assert_eq!(output_of(r#"{"run":{"output":42}}"#), None);
        assert_eq!(output_of("[1, 2]"), None);
        assert_eq!(output_of("null"), None);

        let resp: ExecuteResponse = serde_json::from_str(r#"{"run":{"code":"0"}}"#).unwrap();
        assert_eq!(resp.exit_code(), None);
    }

    #[test]
    fn non_json_body_is_a_parse_error() {
        assert!(serde_json::from_str::<ExecuteResponse>("<html>bad gateway</html>").is_err());
    }

    #[test]
    fn status_error_message_includes_service_text() {
        let err = ExecError::HttpStatus {
            status: 400,
            message: Some("python-9.9.9 runtime is unknown".into()),
        };
        assert_eq!(
            err.to_string(),
            "Request failed with status code 400: python-9.9.9 runtime is unknown"
        );
        let bare = ExecError::HttpStatus { status: 502, message: None };
        assert_eq!(bare.to_string(), "Request failed with status code 502");
    }
}
