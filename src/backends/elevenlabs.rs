//! ElevenLabs API client implementation for speech synthesis.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::error::SmartBotError;
use crate::tts::TextToSpeechProvider;

const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io/v1";
const DEFAULT_MODEL: &str = "eleven_multilingual_v2";
const DEFAULT_VOICE: &str = "21m00Tcm4TlvDq8ikWAM";

/// Client for ElevenLabs' text-to-speech endpoint.
pub struct ElevenLabs {
    pub api_key: String,
    pub base_url: String,
    pub model_id: String,
    pub voice: String,
    client: Client,
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

impl ElevenLabs {
    /// Creates a new ElevenLabs client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - ElevenLabs API key for authentication
    /// * `voice` - Voice id to synthesize with (defaults to a stock voice)
    /// * `model_id` - TTS model (defaults to the multilingual model)
    /// * `timeout_seconds` - Request timeout in seconds
    pub fn new(
        api_key: impl Into<String>,
        voice: Option<String>,
        model_id: Option<String>,
        timeout_seconds: Option<u64>,
    ) -> Self {
        let mut builder = Client::builder();
        if let Some(sec) = timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(sec));
        }
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model_id: model_id.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            voice: voice.unwrap_or_else(|| DEFAULT_VOICE.to_string()),
            client: builder.build().expect("Failed to build reqwest Client"),
        }
    }
}

#[async_trait]
impl TextToSpeechProvider for ElevenLabs {
    /// Synthesizes `text` and returns the encoded audio bytes.
    async fn speech(&self, text: &str) -> Result<Vec<u8>, SmartBotError> {
        if self.api_key.is_empty() {
            return Err(SmartBotError::AuthError(
                "Missing ElevenLabs API key".to_string(),
            ));
        }

        let response = self
            .client
            .post(format!("{}/text-to-speech/{}", self.base_url, self.voice))
            .header("xi-api-key", &self.api_key)
            .json(&SpeechRequest {
                text,
                model_id: &self.model_id,
            })
            .send()
            .await?;

        log::debug!("ElevenLabs HTTP status: {}", response.status());

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(SmartBotError::ProviderError(format!(
                "ElevenLabs API returned status {status}: {detail}"
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
const TTS_API_KEY_ENV: &str = "ELEVENLABS_API_KEY";

#[tokio::test]
async fn test_elevenlabs_speech() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = match std::env::var(TTS_API_KEY_ENV) {
        Ok(key) => key,
        Err(_) => {
            eprintln!("test test_elevenlabs_speech ... ignored, {TTS_API_KEY_ENV} not set");
            return Ok(());
        }
    };
    let tts = ElevenLabs::new(api_key, None, None, Some(60));
    let audio = tts.speech("Hello from SmartBot.").await?;
    assert!(!audio.is_empty(), "Expected audio bytes");
    Ok(())
}
