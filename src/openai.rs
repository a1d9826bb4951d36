//! Blocking OpenAI chat-completions client.
//!
//! The wizard never calls this on its event loop; requests go through the
//! dispatcher which runs them on a blocking worker and reports back with a
//! completion event. An empty choice list or blank message content is a
//! failure here, so callers only ever see usable text or an error.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    api_key: String,
    model: String,
    endpoint: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, model: &str) -> Self {
        Self {
            api_key,
            model: model.to_string(),
            endpoint: CHAT_COMPLETIONS_URL.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends a single-message chat completion and returns the full text.
    /// Blocks until the service responds or the timeout elapses.
    pub fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };
        let body = serde_json::to_string(&request).context("Failed to encode chat request")?;

        let config = ureq::Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build();
        let agent: ureq::Agent = config.into();

        let raw = agent
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .send(body)
            .context("Chat completion request failed")?
            .body_mut()
            .read_to_string()
            .context("Failed to read chat completion response")?;

        parse_completion(&raw)
    }
}

/// Extracts the first choice's message text from a raw completions response.
fn parse_completion(raw: &str) -> Result<String> {
    let response: ChatResponse =
        serde_json::from_str(raw).context("Failed to parse chat completion response")?;

    let Some(choice) = response.choices.into_iter().next() else {
        bail!("Chat completion returned no choices");
    };

    let content = choice.message.content.trim().to_string();
    if content.is_empty() {
        bail!("Chat completion returned an empty message");
    }
    Ok(content)
}
