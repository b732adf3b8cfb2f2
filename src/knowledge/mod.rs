use crate::error::SmartBotError;
use async_trait::async_trait;

/// Trait implemented by encyclopedia-style knowledge lookup collaborators.
#[async_trait]
pub trait KnowledgeProvider: Send + Sync {
    /// Look up a short text snippet about a topic
    ///
    /// # Arguments
    ///
    /// * `topic` - The topic to search for
    ///
    /// # Returns
    ///
    /// * `Ok(Some(snippet))` - A short extract about the topic
    /// * `Ok(None)` - The topic was not found
    /// * `Err(SmartBotError)` - The lookup itself failed
    async fn search(&self, topic: &str) -> Result<Option<String>, SmartBotError>;
}
