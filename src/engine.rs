//! The assistant engine: ties the chat backend, conversation memory, persona
//! and the image-generation path together.
//!
//! Image generation tries the real collaborator first; any failure (or the
//! absence of a configured provider) falls back to the offline procedural
//! renderer. That fallback is the reason the renderer exists, so it must
//! always produce something displayable.

use std::io::Cursor;

use crate::chat::{ChatMessage, ChatProvider};
use crate::error::SmartBotError;
use crate::imagegen::ImageGenProvider;
use crate::knowledge::KnowledgeProvider;
use crate::memory::SlidingWindowMemory;
use crate::persona::ModelMapping;
use crate::render::{render_at, reveal::reveal_frames, reveal::RevealFrames, Canvas, Resolution};
use crate::scene::parse;
use crate::tts::TextToSpeechProvider;

/// Result of an image-generation request.
pub struct GeneratedImage {
    /// Encoded image bytes (PNG for procedural output, whatever the provider
    /// returned otherwise).
    pub bytes: Vec<u8>,
    /// Short caption summarizing the detected scene content.
    pub caption: String,
    /// True when the procedural renderer produced the image.
    pub procedural: bool,
    /// The raster canvas, present only for procedural output so the caller
    /// can run a reveal animation over it.
    pub canvas: Option<Canvas>,
}

impl GeneratedImage {
    /// Reveal-animation frames over a procedural canvas, when one exists.
    pub fn reveal(&self, steps: u32) -> Option<RevealFrames> {
        self.canvas.as_ref().map(|c| reveal_frames(c, steps))
    }
}

/// The assembled assistant. Build one with
/// [`SmartBotBuilder`](crate::builder::SmartBotBuilder).
pub struct SmartBot {
    pub(crate) chat: Box<dyn ChatProvider>,
    pub(crate) imagegen: Option<Box<dyn ImageGenProvider>>,
    pub(crate) knowledge: Option<Box<dyn KnowledgeProvider>>,
    pub(crate) tts: Option<Box<dyn TextToSpeechProvider>>,
    pub(crate) system_prompt: String,
    pub(crate) models: ModelMapping,
    pub(crate) memory: SlidingWindowMemory,
    pub(crate) default_resolution: Resolution,
}

impl SmartBot {
    /// Sends a user message and returns the assistant's reply.
    ///
    /// `alias` is the UI-facing model name ("SmartBot 1.2 Pro"); the real
    /// provider model id never leaves the persona mapping. Both sides of the
    /// exchange are stored in the sliding-window memory.
    pub async fn respond(&mut self, input: &str, alias: &str) -> Result<String, SmartBotError> {
        let model = self.models.resolve(alias)?.to_string();

        let mut messages = self.memory.messages();
        messages.push(ChatMessage::user().content(input).build());

        log::debug!("chat request: model={model}, history={} messages", messages.len());
        let reply = self
            .chat
            .chat(&messages, Some(&self.system_prompt), &model)
            .await?;

        self.memory.remember(ChatMessage::user().content(input).build());
        self.memory.remember(ChatMessage::assistant().content(&reply).build());
        Ok(reply)
    }

    /// Generates an image for `prompt`.
    ///
    /// Tries the configured image-generation collaborator first; on any
    /// error (or when none is configured) parses the prompt into a scene
    /// and renders it procedurally. The fallback never fails.
    pub async fn generate_image(
        &self,
        prompt: &str,
        resolution: Option<Resolution>,
    ) -> Result<GeneratedImage, SmartBotError> {
        let scene = parse(prompt);
        let caption = scene.caption();

        if let Some(provider) = &self.imagegen {
            match provider.generate(prompt).await {
                Ok(bytes) => {
                    return Ok(GeneratedImage {
                        bytes,
                        caption,
                        procedural: false,
                        canvas: None,
                    });
                }
                Err(e) => {
                    log::warn!("image provider failed, using procedural renderer: {e}");
                }
            }
        }

        let resolution = resolution.unwrap_or(self.default_resolution);
        let canvas = render_at(&scene, resolution)?;
        let bytes = encode_png(&canvas)?;
        Ok(GeneratedImage {
            bytes,
            caption,
            procedural: true,
            canvas: Some(canvas),
        })
    }

    /// Looks up a short topic summary via the knowledge collaborator.
    pub async fn lookup(&self, topic: &str) -> Result<Option<String>, SmartBotError> {
        match &self.knowledge {
            Some(provider) => provider.search(topic).await,
            None => Err(SmartBotError::ProviderError(
                "No knowledge provider configured".to_string(),
            )),
        }
    }

    /// Synthesizes speech for `text` via the TTS collaborator.
    pub async fn speak(&self, text: &str) -> Result<Vec<u8>, SmartBotError> {
        match &self.tts {
            Some(provider) => provider.speech(text).await,
            None => Err(SmartBotError::ProviderError(
                "No text-to-speech provider configured".to_string(),
            )),
        }
    }

    /// Clears the conversation memory. The pinned system prompt is not part
    /// of memory and survives.
    pub fn reset_conversation(&mut self) {
        self.memory.clear();
    }

    /// Current conversation history (most recent window).
    pub fn history(&self) -> Vec<ChatMessage> {
        self.memory.messages()
    }
}

/// Encodes a canvas as PNG bytes.
pub fn encode_png(canvas: &Canvas) -> Result<Vec<u8>, SmartBotError> {
    let mut buf = Cursor::new(Vec::new());
    canvas.write_to(&mut buf, image::ImageFormat::Png)?;
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::SmartBotBuilder;
    use async_trait::async_trait;

    struct EchoChat;

    #[async_trait]
    impl ChatProvider for EchoChat {
        async fn chat(
            &self,
            messages: &[ChatMessage],
            _system: Option<&str>,
            model: &str,
        ) -> Result<String, SmartBotError> {
            Ok(format!("[{model}] {}", messages.last().unwrap().content))
        }
    }

    struct FailingImageGen;

    #[async_trait]
    impl ImageGenProvider for FailingImageGen {
        async fn generate(&self, _prompt: &str) -> Result<Vec<u8>, SmartBotError> {
            Err(SmartBotError::ProviderError("model loading".into()))
        }
    }

    fn bot() -> SmartBot {
        SmartBotBuilder::new()
            .chat_provider(Box::new(EchoChat))
            .image_provider(Box::new(FailingImageGen))
            .default_resolution(Resolution::Sd480)
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn respond_maps_alias_and_remembers_both_turns() {
        let mut bot = bot();
        let reply = bot.respond("hello there", "SmartBot 1.1 Flash").await.unwrap();
        assert!(reply.starts_with("[llama-3.1-8b-instant]"));
        assert_eq!(bot.history().len(), 2);
    }

    #[tokio::test]
    async fn unknown_alias_is_rejected_before_any_call() {
        let mut bot = bot();
        let err = bot.respond("hi", "SmartBot 9000").await.unwrap_err();
        assert!(matches!(err, SmartBotError::InvalidRequest(_)));
        assert!(bot.history().is_empty());
    }

    #[tokio::test]
    async fn failed_image_provider_falls_back_to_renderer() {
        let bot = bot();
        let image = bot.generate_image("a house at night", None).await.unwrap();
        assert!(image.procedural);
        assert!(!image.bytes.is_empty());
        let canvas = image.canvas.as_ref().unwrap();
        assert_eq!(canvas.dimensions(), Resolution::Sd480.dimensions());
        assert!(image.caption.contains("house"));
        // PNG magic bytes.
        assert_eq!(&image.bytes[..8], &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n']);
    }

    #[tokio::test]
    async fn no_image_provider_also_falls_back() {
        let bot = SmartBotBuilder::new()
            .chat_provider(Box::new(EchoChat))
            .default_resolution(Resolution::Sd480)
            .build()
            .unwrap();
        let image = bot.generate_image("xyzzyzz", None).await.unwrap();
        assert!(image.procedural);
        // Default scene still renders a non-empty canvas.
        let canvas = image.canvas.unwrap();
        assert!(canvas.pixels().any(|p| p.0 != [0, 0, 0]));
    }

    #[tokio::test]
    async fn reveal_runs_over_procedural_output() {
        let bot = bot();
        let image = bot.generate_image("a tree", None).await.unwrap();
        let frames: Vec<_> = image.reveal(3).unwrap().collect();
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[3].as_raw(), image.canvas.unwrap().as_raw());
    }

    #[tokio::test]
    async fn memory_window_trims_old_turns() {
        let mut bot = SmartBotBuilder::new()
            .chat_provider(Box::new(EchoChat))
            .memory_window(4)
            .build()
            .unwrap();
        for i in 0..5 {
            bot.respond(&format!("message {i}"), "SmartBot 1.2 Pro").await.unwrap();
        }
        let history = bot.history();
        assert_eq!(history.len(), 4);
        assert!(history[0].content.contains("message 3") || history[0].content.contains("message 4"));
    }
}
