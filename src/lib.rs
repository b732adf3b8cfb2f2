//! SmartBot is a branded chat assistant core with an offline, deterministic
//! procedural scene renderer.
//!
//! # Overview
//! The crate has two halves:
//!
//! - A pure, in-memory image pipeline: a keyword-driven prompt parser, a
//!   layered 2D scene renderer with procedural textures, and a progressive
//!   blur-to-sharp reveal animation for display purposes.
//! - Thin collaborator clients (chat completion, real image generation,
//!   knowledge lookup, text-to-speech) assembled behind a branded persona.
//!
//! The renderer is the fallback path of the image-generation collaborator:
//! when the external service fails or is not configured, the assistant still
//! answers with a procedurally drawn scene.
//!
//! # Example
//! ```no_run
//! use smartbot::builder::SmartBotBuilder;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut bot = SmartBotBuilder::new()
//!         .groq_api_key(std::env::var("GROQ_API_KEY")?)
//!         .knowledge_lookup(true)
//!         .build()?;
//!
//!     let reply = bot.respond("Hi!", "SmartBot 1.2 Pro").await?;
//!     println!("{reply}");
//!
//!     let image = bot.generate_image("a red house at night", None).await?;
//!     std::fs::write("scene.png", &image.bytes)?;
//!     println!("{} (procedural: {})", image.caption, image.procedural);
//!     Ok(())
//! }
//! ```

// Re-export for convenience
pub use async_trait::async_trait;

/// Collaborator backend implementations (Groq, Hugging Face, Wikipedia,
/// ElevenLabs)
pub mod backends;

/// Builder pattern for configuring and instantiating the assistant
pub mod builder;

/// The assistant engine tying chat, memory, persona and image fallback
/// together
pub mod engine;

/// Error types and handling
pub mod error;

/// Chat message types and the chat provider trait
pub mod chat;

/// Real image-generation collaborator trait
pub mod imagegen;

/// Knowledge lookup collaborator trait
pub mod knowledge;

/// Conversation memory
pub mod memory;

/// Branded persona: system prompt and model alias mapping
pub mod persona;

/// Procedural scene renderer, textures and the reveal animation
pub mod render;

/// Prompt parsing into structured scenes
pub mod scene;

/// Text-to-speech collaborator trait
pub mod tts;

pub use engine::{GeneratedImage, SmartBot};
pub use error::SmartBotError;

#[inline]
/// Initialize logging using env_logger if the "logging" feature is enabled.
/// This is a no-op if the feature is not enabled.
pub fn init_logging() {
    #[cfg(feature = "logging")]
    {
        let _ = env_logger::try_init();
    }
}
