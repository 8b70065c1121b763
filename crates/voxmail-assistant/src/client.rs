//! Chat-completions client producing intent analyses.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use voxmail_core::config::AssistantConfig;
use voxmail_core::VoxmailError;
use voxmail_intent::{ConversationError, IntentAnalysis, LanguageUnderstanding};

use crate::prompt::analysis_prompt;

/// Errors from the assistant client.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("service returned status {0}")]
    Status(u16),
    #[error("response had no content")]
    EmptyResponse,
    #[error("unparseable analysis: {0}")]
    Unparseable(String),
}

impl From<AssistantError> for VoxmailError {
    fn from(err: AssistantError) -> Self {
        VoxmailError::Assistant(err.to_string())
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Client for an OpenAI-compatible chat-completions API.
pub struct AssistantClient {
    client: Client,
    api_base: String,
    api_key: String,
    model: String,
}

impl AssistantClient {
    /// Build a client from configuration and a resolved API key.
    pub fn new(config: &AssistantConfig, api_key: String) -> Result<Self, AssistantError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            api_key,
            model: config.model.clone(),
        })
    }

    async fn request_analysis(
        &self,
        utterance: &str,
        context: &str,
    ) -> Result<IntentAnalysis, AssistantError> {
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: analysis_prompt(utterance, context),
            }],
            temperature: 0.0,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssistantError::Status(status.as_u16()));
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .first()
            .map(|c| c.message.content.trim())
            .filter(|c| !c.is_empty())
            .ok_or(AssistantError::EmptyResponse)?;

        debug!(len = content.len(), "Assistant replied");
        parse_analysis(content)
    }
}

#[async_trait]
impl LanguageUnderstanding for AssistantClient {
    async fn analyze(
        &self,
        utterance: &str,
        context: &str,
    ) -> Result<IntentAnalysis, ConversationError> {
        self.request_analysis(utterance, context)
            .await
            .map_err(|e| {
                warn!(error = %e, "Assistant analysis failed");
                ConversationError::Analysis(e.to_string())
            })
    }
}

/// Parse the model's reply into an analysis.
///
/// Models routinely wrap JSON in Markdown code fences despite instructions,
/// so fences are stripped before parsing. Anything that still fails to parse
/// is an error; the caller falls back to keyword heuristics.
pub fn parse_analysis(content: &str) -> Result<IntentAnalysis, AssistantError> {
    let stripped = strip_code_fence(content);
    IntentAnalysis::from_json(stripped)
        .map_err(|e| AssistantError::Unparseable(format!("{}: {}", e, truncate(stripped, 120))))
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop an optional language tag after the opening fence.
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
