//! Collaborator service implementations consumed by the assistant engine.
//!
//! Each backend is a thin HTTP client for one external service: chat
//! completion, real image generation, knowledge lookup, speech synthesis.
//! The core renderer never touches any of these; it only exists as the
//! offline fallback when the image-generation backend fails.

pub mod elevenlabs;
pub mod groq;
pub mod huggingface;
pub mod wikipedia;
