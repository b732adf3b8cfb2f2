//! Groq API client implementation for chat functionality.
//!
//! Groq exposes an OpenAI-compatible chat completions endpoint; this client
//! speaks that wire format directly.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::chat::{ChatMessage, ChatProvider, ChatRole};
use crate::error::SmartBotError;

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Client for Groq's chat completions API.
pub struct Groq {
    pub api_key: String,
    pub base_url: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: Option<f32>,
    client: Client,
}

/// Request payload for the OpenAI-compatible chat completions endpoint.
#[derive(Serialize)]
struct GroqChatRequest<'a> {
    model: &'a str,
    messages: Vec<GroqMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    stream: bool,
}

/// Individual message in a chat completions conversation.
#[derive(Serialize)]
struct GroqMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct GroqChatResponse {
    choices: Vec<GroqChoice>,
}

#[derive(Deserialize)]
struct GroqChoice {
    message: GroqResponseMessage,
}

#[derive(Deserialize)]
struct GroqResponseMessage {
    content: String,
}

impl Groq {
    /// Creates a new Groq client with the specified configuration.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Groq API key for authentication
    /// * `base_url` - Endpoint override (defaults to the public Groq API)
    /// * `max_tokens` - Maximum tokens in response (defaults to 2048)
    /// * `temperature` - Sampling temperature (defaults to 0.75)
    /// * `timeout_seconds` - Request timeout in seconds (defaults to 30)
    pub fn new(
        api_key: impl Into<String>,
        base_url: Option<String>,
        max_tokens: Option<u32>,
        temperature: Option<f32>,
        top_p: Option<f32>,
        timeout_seconds: Option<u64>,
    ) -> Self {
        let mut builder = Client::builder();
        if let Some(sec) = timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(sec));
        }
        Self {
            api_key: api_key.into(),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            max_tokens: max_tokens.unwrap_or(2048),
            temperature: temperature.unwrap_or(0.75),
            top_p,
            client: builder.build().expect("Failed to build reqwest Client"),
        }
    }
}

#[async_trait]
impl ChatProvider for Groq {
    /// Sends a chat request to Groq's API.
    async fn chat(
        &self,
        messages: &[ChatMessage],
        system: Option<&str>,
        model: &str,
    ) -> Result<String, SmartBotError> {
        if self.api_key.is_empty() {
            return Err(SmartBotError::AuthError("Missing Groq API key".to_string()));
        }

        let mut wire_messages = Vec::with_capacity(messages.len() + 1);
        if let Some(system) = system {
            wire_messages.push(GroqMessage {
                role: "system",
                content: system,
            });
        }
        wire_messages.extend(messages.iter().map(|m| GroqMessage {
            role: match m.role {
                ChatRole::User => "user",
                ChatRole::Assistant => "assistant",
            },
            content: &m.content,
        }));

        let req_body = GroqChatRequest {
            model,
            messages: wire_messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
            stream: false,
        };

        if log::log_enabled!(log::Level::Trace) {
            if let Ok(json) = serde_json::to_string(&req_body) {
                log::trace!("Groq request payload: {}", json);
            }
        }

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&req_body)
            .send()
            .await?;

        log::debug!("Groq HTTP status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(SmartBotError::ProviderError(format!(
                "Groq API returned status {status}: {detail}"
            )));
        }

        let json_resp: GroqChatResponse = response
            .json()
            .await
            .map_err(|e| SmartBotError::JsonError(e.to_string()))?;
        let choice = json_resp
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| SmartBotError::ProviderError("No choices returned by Groq".into()))?;
        Ok(choice.message.content.trim().to_string())
    }
}

#[cfg(test)]
const LLM_API_KEY_ENV: &str = "GROQ_API_KEY";

#[tokio::test]
async fn test_groq_chat() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = match std::env::var(LLM_API_KEY_ENV) {
        Ok(key) => key,
        Err(_) => {
            eprintln!("test test_groq_chat ... ignored, {LLM_API_KEY_ENV} not set");
            return Ok(());
        }
    };
    let groq = Groq::new(api_key, None, Some(128), Some(0.7), None, Some(30));
    let messages = vec![ChatMessage::user().content("Hello.").build()];
    let response = groq
        .chat(&messages, Some("You are a terse assistant."), "llama-3.1-8b-instant")
        .await?;
    assert!(!response.is_empty(), "Expected response text");
    Ok(())
}
