//! OpenAI-compatible chat-completions client.
//!
//! One endpoint serves both call shapes: full-history chat turns and
//! single-message file summarization, distinguished only by prompt content.
//!
//! # Retry Strategy
//!
//! Transient failures are retried with exponential backoff:
//! - HTTP 429 (rate limited) and 5xx (server error) → retry
//! - HTTP 4xx (client error, not 429) → fail immediately
//! - Network errors → retry
//! - Backoff: 1s, 2s, 4s, 8s, 16s, 32s (capped at 2^5)

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

use crate::chunk::Summarizer;
use crate::config::ModelConfig;
use crate::models::ConversationEntry;

#[derive(Debug)]
pub struct ModelClient {
    http: reqwest::Client,
    config: ModelConfig,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: String,
}

impl ModelClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable named by
    /// `model.api_key_env` is not set, or the HTTP client cannot be built.
    pub fn new(config: &ModelConfig) -> Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .map_err(|_| anyhow::anyhow!("{} environment variable not set", config.api_key_env))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            config: config.clone(),
            api_key,
        })
    }

    /// Send the full ordered conversation and return the assistant reply.
    pub async fn complete(&self, messages: &[ConversationEntry]) -> Result<String> {
        let body = serde_json::json!({
            "model": self.config.model,
            "messages": messages,
        });
        self.request(&body).await
    }

    async fn request(&self, body: &serde_json::Value) -> Result<String> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let mut last_err = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s, 8s, ...
                let delay = Duration::from_secs(1 << (attempt - 1).min(5));
                tokio::time::sleep(delay).await;
            }

            let resp = self
                .http
                .post(&url)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .header("Content-Type", "application/json")
                .json(body)
                .send()
                .await;

            match resp {
                Ok(response) => {
                    let status = response.status();

                    if status.is_success() {
                        let parsed: ChatResponse = response
                            .json()
                            .await
                            .with_context(|| "Invalid chat completion response")?;
                        return reply_text(parsed);
                    }

                    // Rate limited or server error — retry
                    if status.as_u16() == 429 || status.is_server_error() {
                        let body_text = response.text().await.unwrap_or_default();
                        warn!(status = %status, attempt, "retrying chat completion");
                        last_err = Some(anyhow::anyhow!(
                            "Model API error {}: {}",
                            status,
                            body_text
                        ));
                        continue;
                    }

                    // Client error (not 429) — don't retry
                    let body_text = response.text().await.unwrap_or_default();
                    bail!("Model API error {}: {}", status, body_text);
                }
                Err(e) => {
                    last_err = Some(e.into());
                    continue;
                }
            }
        }

        Err(last_err.unwrap_or_else(|| anyhow::anyhow!("Chat completion failed after retries")))
    }
}

#[async_trait]
impl Summarizer for ModelClient {
    /// Ask the model to condense one file for review purposes. Same call
    /// shape as [`ModelClient::complete`], distinguished only by the prompt.
    async fn summarize(&self, path: &str, content: &str) -> Result<String> {
        let prompt = format!(
            "Summarize this file content for code review purposes:\nFile: {}\n{}",
            path, content
        );
        let body = serde_json::json!({
            "model": self.config.model,
            "messages": [{"role": "user", "content": prompt}],
        });
        self.request(&body).await
    }
}

/// Extract the reply text from a parsed chat completion response.
fn reply_text(response: ChatResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| anyhow::anyhow!("Chat completion response contained no choices"))
}
