//! Summarization service client and prompt builders.
//!
//! The summarizer is a single-turn chat-completions endpoint: one user
//! message in, generated text out. Rate limits, retries, and streaming are
//! the provider's concern; this client makes one call with a deadline.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};

/// Trait for the summarization service.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Produce generated text for a prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, times out, or the response
    /// cannot be decoded.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Build the per-agent performance prompt.
#[must_use]
pub fn agent_prompt(agent: &str, stat_block: &str) -> String {
    format!(
        "You are writing a performance summary for support agent {agent}.\n\n\
         Here are their stats:\n{stat_block}\n\n\
         Write a bullet-point summary of this performance."
    )
}

/// Build the team-level prompt.
#[must_use]
pub fn team_prompt(team: &str, stats: &str) -> String {
    format!(
        "You are a team lead reviewing metrics for {team}.\n\n\
         Here are the team's performance stats:\n{stats}\n\n\
         Write 3-5 bullet points summarizing overall performance."
    )
}

/// Request payload for the chat-completions endpoint.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

/// One chat message.
#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Response payload from the chat-completions endpoint.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// HTTP client for a chat-completions summarization endpoint.
#[derive(Debug, Clone)]
pub struct HttpSummarizer {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
}

impl HttpSummarizer {
    /// Create a new summarizer client with a 60s request deadline.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created (should never happen
    /// with default TLS).
    #[must_use]
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("failed to create HTTP client");

        Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key,
        }
    }
}

#[async_trait]
impl Summarizer for HttpSummarizer {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut builder = self.client.post(&self.endpoint).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ReportError::Timeout(format!("summarizer: {e}"))
            } else {
                ReportError::Summarizer(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            return Err(ReportError::Summarizer(format!(
                "summarizer returned HTTP {}",
                response.status()
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| ReportError::Decode(e.to_string()))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ReportError::Decode("response has no choices".to_string()))?;

        Ok(content.trim().to_string())
    }
}
