//! Chat-completions client for the Mistral API.
//!
//! A single blocking-style call per request: no retries, no streaming. Any
//! remote failure is reported as a [`CompletionError`] and the caller decides
//! whether to surface it or substitute a static fallback.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{MISTRAL_API_BASE, MISTRAL_MODEL};

/// Message role in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One role-tagged message in a conversation. Immutable once appended to a
/// history buffer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion API returned {status}: {body}")]
    Api { status: reqwest::StatusCode, body: String },

    #[error("completion API returned no choices")]
    EmptyResponse,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ConversationTurn],
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Thin wrapper around the chat-completions endpoint.
pub struct LlmClient {
    http: Client,
    api_key: String,
    api_base: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base(api_key, MISTRAL_API_BASE.to_string())
    }

    /// Point the client at a different OpenAI-compatible base URL.
    pub fn with_base(api_key: String, api_base: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            api_base,
        }
    }

    /// One completion over an explicit list of turns. The caller is
    /// responsible for putting the system turn first.
    pub async fn complete(&self, turns: &[ConversationTurn]) -> Result<String, CompletionError> {
        let request = ChatRequest {
            model: MISTRAL_MODEL,
            messages: turns,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api { status, body });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(CompletionError::EmptyResponse)
    }

    /// One completion from a minimal system + user pair, no history.
    pub async fn complete_once(
        &self,
        system_prompt: &str,
        user_text: &str,
    ) -> Result<String, CompletionError> {
        let turns = [
            ConversationTurn::system(system_prompt),
            ConversationTurn::user(user_text),
        ];
        self.complete(&turns).await
    }
}
