use crate::error::SmartBotError;
use async_trait::async_trait;

/// Trait implemented by all text to speech collaborators
///
/// This trait defines the interface for text-to-speech conversion services.
/// Implementors must provide functionality to convert text into audio data.
#[async_trait]
pub trait TextToSpeechProvider: Send + Sync {
    /// Convert the given text into speech audio
    ///
    /// # Arguments
    ///
    /// * `text` - A string containing the text to convert to speech
    ///
    /// # Returns
    ///
    /// * `Result<Vec<u8>, SmartBotError>` - On success, returns the audio data
    ///   as a vector of bytes. On failure, returns an error describing what
    ///   went wrong.
    async fn speech(&self, text: &str) -> Result<Vec<u8>, SmartBotError>;
}
