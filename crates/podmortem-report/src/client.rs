//! Chat-completion client — the only network call in podmortem.
//!
//! [`ChatCompletionClient`] posts one OpenAI-style chat-completion request per
//! report. Each attempt is bounded by the configured timeout. Transport
//! failures, timeouts, `429` and `5xx` responses are retried up to
//! `max_retries` times with a fixed back-off; any other status fails at once.

use crate::prompt::{build_user_prompt, missing_sections, SYSTEM_PROMPT};
use crate::ReportError;
use podmortem_core::config::LlmConfig;
use podmortem_core::Finding;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::{Duration, Instant};

/// Longest slice of an error body kept in [`ReportError::Api`].
const MAX_ERROR_BODY: usize = 512;

/// Produces a markdown RCA report from log text and heuristic findings.
pub trait Summarizer {
    fn summarize(
        &self,
        log_text: &str,
        findings: &[Finding],
    ) -> impl Future<Output = Result<String, ReportError>> + Send;
}

/// Resolved client settings. Built from `[llm]` config plus the API key.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub api_key: String,
    pub timeout: Duration,
    pub max_retries: u32,
    pub retry_backoff: Duration,
    pub max_log_chars: usize,
}

impl ClientOptions {
    /// Use `cfg`, reading the API key from the environment variable it names.
    pub fn from_config(cfg: &LlmConfig) -> Result<Self, ReportError> {
        let api_key = std::env::var(&cfg.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ReportError::MissingApiKey {
                var: cfg.api_key_env.clone(),
            })?;
        Ok(Self::with_api_key(cfg, api_key))
    }

    pub fn with_api_key(cfg: &LlmConfig, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            temperature: cfg.temperature,
            api_key: api_key.into(),
            timeout: Duration::from_secs(cfg.timeout_secs),
            max_retries: cfg.max_retries,
            retry_backoff: Duration::from_millis(cfg.retry_backoff_ms),
            max_log_chars: cfg.max_log_chars,
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct ChatCompletionClient {
    http: reqwest::Client,
    opts: ClientOptions,
}

impl ChatCompletionClient {
    pub fn new(opts: ClientOptions) -> Result<Self, ReportError> {
        let http = reqwest::Client::builder()
            .timeout(opts.timeout)
            .build()
            .map_err(ReportError::Client)?;
        Ok(Self { http, opts })
    }

    async fn send_once(&self, request: &ChatRequest<'_>) -> Result<String, ReportError> {
        let response = self
            .http
            .post(&self.opts.endpoint)
            .bearer_auth(&self.opts.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = crate::prompt::truncate_chars(&body, MAX_ERROR_BODY).to_string();
            return Err(ReportError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(ReportError::EmptyResponse)
    }
}

impl Summarizer for ChatCompletionClient {
    async fn summarize(&self, log_text: &str, findings: &[Finding]) -> Result<String, ReportError> {
        let user_prompt = build_user_prompt(log_text, findings, self.opts.max_log_chars);
        let request = ChatRequest {
            model: &self.opts.model,
            temperature: self.opts.temperature,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
        };

        let started = Instant::now();
        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.send_once(&request).await {
                Ok(report) => {
                    tracing::info!(
                        model = %self.opts.model,
                        attempt,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        chars = report.chars().count(),
                        "report received"
                    );
                    let missing = missing_sections(&report);
                    if !missing.is_empty() {
                        tracing::warn!(?missing, "report is missing expected sections");
                    }
                    return Ok(report);
                }
                Err(e) if e.is_retryable() && attempt <= self.opts.max_retries => {
                    tracing::warn!(attempt, error = %e, "chat completion failed, retrying");
                    tokio::time::sleep(self.opts.retry_backoff).await;
                }
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "chat completion failed");
                    return Err(e);
                }
            }
        }
    }
}
