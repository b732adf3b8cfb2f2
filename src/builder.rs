//! Builder module for configuring and assembling the assistant.
//!
//! Provides a fluent interface for choosing collaborator backends, keys and
//! generation parameters, then producing a ready [`SmartBot`].

use crate::backends::elevenlabs::ElevenLabs;
use crate::backends::groq::Groq;
use crate::backends::huggingface::HuggingFace;
use crate::backends::wikipedia::Wikipedia;
use crate::chat::ChatProvider;
use crate::engine::SmartBot;
use crate::error::SmartBotError;
use crate::imagegen::ImageGenProvider;
use crate::knowledge::KnowledgeProvider;
use crate::memory::SlidingWindowMemory;
use crate::persona::{ModelMapping, SYSTEM_PROMPT};
use crate::render::Resolution;
use crate::tts::TextToSpeechProvider;

/// Default conversation window: system prompt excluded, last 7 exchanges.
const DEFAULT_MEMORY_WINDOW: usize = 14;

/// Builder for configuring and instantiating a [`SmartBot`].
///
/// A chat backend is mandatory: either a Groq API key or an injected
/// [`ChatProvider`]. Every other collaborator is optional; without an image
/// provider the procedural renderer simply handles every image request.
#[derive(Default)]
pub struct SmartBotBuilder {
    /// Groq API key for the chat backend
    groq_api_key: Option<String>,
    /// Hugging Face token enabling real image generation
    hf_api_key: Option<String>,
    /// Image model repository id
    image_model: Option<String>,
    /// ElevenLabs API key enabling speech output
    elevenlabs_api_key: Option<String>,
    /// Voice id for speech output
    voice: Option<String>,
    /// Whether to wire the Wikipedia lookup collaborator
    knowledge_lookup: bool,
    /// System prompt override (defaults to the branded persona prompt)
    system: Option<String>,
    /// UI alias to provider model mapping
    models: Option<ModelMapping>,
    /// Sampling temperature for chat responses
    temperature: Option<f32>,
    /// Maximum tokens to generate in chat responses
    max_tokens: Option<u32>,
    /// Top-p (nucleus) sampling parameter
    top_p: Option<f32>,
    /// Request timeout in seconds for all collaborators
    timeout_seconds: Option<u64>,
    /// Conversation memory window size
    memory_window: Option<usize>,
    /// Resolution tier used when an image request does not specify one
    default_resolution: Option<Resolution>,
    /// Injected chat provider, overriding the Groq backend
    chat_override: Option<Box<dyn ChatProvider>>,
    /// Injected image provider, overriding the Hugging Face backend
    image_override: Option<Box<dyn ImageGenProvider>>,
    /// Injected knowledge provider, overriding the Wikipedia backend
    knowledge_override: Option<Box<dyn KnowledgeProvider>>,
    /// Injected TTS provider, overriding the ElevenLabs backend
    tts_override: Option<Box<dyn TextToSpeechProvider>>,
}

impl SmartBotBuilder {
    /// Creates a new empty builder instance with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the Groq API key for the chat backend.
    pub fn groq_api_key(mut self, key: impl Into<String>) -> Self {
        self.groq_api_key = Some(key.into());
        self
    }

    /// Sets the Hugging Face token, enabling the real image-generation path.
    pub fn hf_api_key(mut self, key: impl Into<String>) -> Self {
        self.hf_api_key = Some(key.into());
        self
    }

    /// Sets the image model repository id.
    pub fn image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = Some(model.into());
        self
    }

    /// Sets the ElevenLabs API key, enabling speech output.
    pub fn elevenlabs_api_key(mut self, key: impl Into<String>) -> Self {
        self.elevenlabs_api_key = Some(key.into());
        self
    }

    /// Sets the voice id for speech output.
    pub fn voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    /// Enables the Wikipedia knowledge lookup collaborator.
    pub fn knowledge_lookup(mut self, enabled: bool) -> Self {
        self.knowledge_lookup = enabled;
        self
    }

    /// Overrides the branded system prompt.
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Replaces the UI-alias model mapping.
    pub fn models(mut self, models: ModelMapping) -> Self {
        self.models = Some(models);
        self
    }

    /// Sets the temperature for controlling response randomness.
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the maximum number of tokens to generate.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Sets the top-p (nucleus) sampling parameter.
    pub fn top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Sets the request timeout in seconds.
    pub fn timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = Some(timeout_seconds);
        self
    }

    /// Sets the conversation memory window size.
    pub fn memory_window(mut self, window: usize) -> Self {
        self.memory_window = Some(window);
        self
    }

    /// Sets the resolution tier used when a request does not specify one.
    pub fn default_resolution(mut self, resolution: Resolution) -> Self {
        self.default_resolution = Some(resolution);
        self
    }

    /// Injects a custom chat provider instead of the Groq backend.
    pub fn chat_provider(mut self, provider: Box<dyn ChatProvider>) -> Self {
        self.chat_override = Some(provider);
        self
    }

    /// Injects a custom image provider instead of the Hugging Face backend.
    pub fn image_provider(mut self, provider: Box<dyn ImageGenProvider>) -> Self {
        self.image_override = Some(provider);
        self
    }

    /// Injects a custom knowledge provider instead of the Wikipedia backend.
    pub fn knowledge_provider(mut self, provider: Box<dyn KnowledgeProvider>) -> Self {
        self.knowledge_override = Some(provider);
        self
    }

    /// Injects a custom TTS provider instead of the ElevenLabs backend.
    pub fn tts_provider(mut self, provider: Box<dyn TextToSpeechProvider>) -> Self {
        self.tts_override = Some(provider);
        self
    }

    /// Assembles the assistant.
    ///
    /// # Returns
    ///
    /// A ready [`SmartBot`], or an [`SmartBotError::AuthError`] when no chat
    /// backend can be configured.
    pub fn build(self) -> Result<SmartBot, SmartBotError> {
        let chat: Box<dyn ChatProvider> = match self.chat_override {
            Some(provider) => provider,
            None => {
                let key = self.groq_api_key.ok_or_else(|| {
                    SmartBotError::AuthError(
                        "No chat backend: set a Groq API key or inject a provider".to_string(),
                    )
                })?;
                Box::new(Groq::new(
                    key,
                    None,
                    self.max_tokens,
                    self.temperature,
                    self.top_p,
                    self.timeout_seconds,
                ))
            }
        };

        let imagegen: Option<Box<dyn ImageGenProvider>> = match self.image_override {
            Some(provider) => Some(provider),
            None => self.hf_api_key.map(|key| {
                Box::new(HuggingFace::new(key, self.image_model, self.timeout_seconds))
                    as Box<dyn ImageGenProvider>
            }),
        };

        let knowledge: Option<Box<dyn KnowledgeProvider>> = match self.knowledge_override {
            Some(provider) => Some(provider),
            None if self.knowledge_lookup => {
                Some(Box::new(Wikipedia::new(self.timeout_seconds)))
            }
            None => None,
        };

        let tts: Option<Box<dyn TextToSpeechProvider>> = match self.tts_override {
            Some(provider) => Some(provider),
            None => self.elevenlabs_api_key.map(|key| {
                Box::new(ElevenLabs::new(key, self.voice, None, self.timeout_seconds))
                    as Box<dyn TextToSpeechProvider>
            }),
        };

        Ok(SmartBot {
            chat,
            imagegen,
            knowledge,
            tts,
            system_prompt: self.system.unwrap_or_else(|| SYSTEM_PROMPT.to_string()),
            models: self.models.unwrap_or_default(),
            memory: SlidingWindowMemory::new(
                self.memory_window.unwrap_or(DEFAULT_MEMORY_WINDOW),
            ),
            default_resolution: self.default_resolution.unwrap_or_default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_without_chat_backend_fails() {
        assert!(matches!(
            SmartBotBuilder::new().build(),
            Err(SmartBotError::AuthError(_))
        ));
    }

    #[test]
    fn build_with_groq_key_succeeds() {
        let bot = SmartBotBuilder::new()
            .groq_api_key("test-key")
            .temperature(0.75)
            .max_tokens(2048)
            .build()
            .unwrap();
        assert!(bot.history().is_empty());
    }
}
