use crate::error::SmartBotError;
use async_trait::async_trait;

/// Trait implemented by real image-generation collaborators.
///
/// The procedural renderer in [`crate::render`] is the deterministic, offline
/// fallback used whenever a provider implementing this trait fails or is not
/// configured.
#[async_trait]
pub trait ImageGenProvider: Send + Sync {
    /// Generate an image for the given prompt
    ///
    /// # Arguments
    ///
    /// * `prompt` - Text description of the desired image
    ///
    /// # Returns
    ///
    /// * `Result<Vec<u8>, SmartBotError>` - On success, the encoded image
    ///   bytes as returned by the service. On failure, an error describing
    ///   what went wrong.
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, SmartBotError>;
}
