//! Reqwest-based client for the Piston code-execution API.

use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{ExecError, ExecuteRequest, ExecuteResponse, Executor, Runtime};
use crate::config::Config;

#[derive(Debug, Clone)]
pub struct PistonClient {
    http: Client,
    base: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl PistonClient {
    pub fn from_config(cfg: &Config) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = cfg.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self::with_client(http, cfg.api_url()))
    }

    pub fn with_client(http: Client, base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self { http, base }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// List the language runtimes installed on the service.
    pub async fn runtimes(&self) -> Result<Vec<Runtime>, ExecError> {
        let url = format!("{}/runtimes", self.base);
        debug!(%url, "listing runtimes");
        let resp = self.http.get(&url).send().await?;
        let body = read_success_body(resp).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn post_execute(&self, request: &ExecuteRequest) -> Result<ExecuteResponse, ExecError> {
        let url = format!("{}/execute", self.base);
        info!(
            %url,
            language = %request.language,
            version = %request.version,
            bytes = request.files.iter().map(|f| f.content.len()).sum::<usize>(),
            "dispatching execute request"
        );
        let resp = self.http.post(&url).json(request).send().await?;
        let body = read_success_body(resp).await?;
        let parsed: ExecuteResponse = serde_json::from_str(&body)?;
        debug!(
            code = parsed.exit_code(),
            has_output = parsed.run_output().is_some(),
            "execute request completed"
        );
        Ok(parsed)
    }
}

async fn read_success_body(resp: reqwest::Response) -> Result<String, ExecError> {
    let status = resp.status();
    let text = resp.text().await?;
    if status.is_success() {
        return Ok(text);
    }
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(|b| b.message)
        .or_else(|| {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        });
    warn!(status = status.as_u16(), message = ?message, "execution service returned an error");
    Err(ExecError::HttpStatus {
        status: status.as_u16(),
        message,
    })
}

impl Executor for PistonClient {
    async fn execute(&self, request: &ExecuteRequest) -> Result<ExecuteResponse, ExecError> {
        self.post_execute(request).await
    }
}
