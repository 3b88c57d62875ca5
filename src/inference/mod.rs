//! OpenRouter chat completion client.
//!
//! "Do X": Send a prompt template plus user input to a hosted model, get text back.
//!
//! The template is the system message, the user's input the user message.
//! Only the first choice is used.

mod internal;

pub use internal::{ChatRequest, Message};

use reqwest::blocking::Client;
use reqwest::StatusCode;

use internal::ChatResponse;

/// Sent as the user message when the user typed nothing.
pub const FALLBACK_USER_INPUT: &str = "Please provide guidance based on the system prompt.";

const REFERER: &str = "https://github.com/now-sc-cli";
const TITLE: &str = "Now-SC CLI Tool";

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("OpenRouter API error (status {status}): {body}")]
    Api { status: u16, body: String },

    /// The call succeeded but returned zero choices
    #[error("no response from API")]
    NoChoices,

    #[error("failed to execute request: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Blocking OpenRouter client
pub struct OpenRouterClient {
    http: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenRouterClient {
    pub fn new(
        http: Client,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the two-message request, substituting the fallback for blank input.
    pub fn build_request(&self, system: &str, user_input: &str) -> ChatRequest {
        let user = if user_input.trim().is_empty() {
            FALLBACK_USER_INPUT
        } else {
            user_input
        };

        ChatRequest {
            model: self.model.clone(),
            messages: vec![Message::system(system), Message::user(user)],
        }
    }

    /// Run one completion and return the first choice's text.
    pub fn complete(&self, system: &str, user_input: &str) -> Result<String, InferenceError> {
        let request = self.build_request(system, user_input);
        tracing::debug!(
            endpoint = %self.endpoint,
            model = %self.model,
            "sending completion request"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", REFERER)
            .header("X-Title", TITLE)
            .json(&request)
            .send()
            .map_err(InferenceError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().unwrap_or_default();
            return Err(InferenceError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().map_err(InferenceError::Decode)?;
        parsed.into_first_content().ok_or(InferenceError::NoChoices)
    }
}
