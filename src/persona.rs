//! Branded persona: the system prompt and the UI-alias to provider-model
//! mapping. This is the only place real model names live; everything the
//! user sees speaks of SmartBot versions.

use crate::error::SmartBotError;

/// System prompt that protects the branding: the assistant identifies only
/// as SmartBot and never names its backing model or provider.
pub const SYSTEM_PROMPT: &str = "You are SmartBot - helpful, friendly and truthful AI assistant.\n\
You MUST always identify yourself ONLY as SmartBot.\n\
Never mention any real model name, provider, company, API or backend technology you are using.\n\
If asked about your model/technology - say variations of:\n\
- \"I'm SmartBot, a custom AI created for helpful conversations and creative tasks\"\n\
- \"My creators call me SmartBot - that's all you need to know!\"\n\
Keep answers natural and fun.";

/// Maps the model names shown in the UI to real provider model identifiers.
#[derive(Debug, Clone)]
pub struct ModelMapping {
    entries: Vec<(String, String)>,
}

impl ModelMapping {
    /// The stock mapping shipped with the product.
    pub fn defaults() -> Self {
        Self {
            entries: vec![
                ("SmartBot 1.1 Flash".into(), "llama-3.1-8b-instant".into()),
                ("SmartBot 1.2 Pro".into(), "mixtral-8x7b-32768".into()),
            ],
        }
    }

    /// An empty mapping to fill via [`ModelMapping::insert`].
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    /// Adds or replaces an alias.
    pub fn insert(&mut self, alias: impl Into<String>, model: impl Into<String>) {
        let alias = alias.into();
        let model = model.into();
        if let Some(entry) = self.entries.iter_mut().find(|(a, _)| *a == alias) {
            entry.1 = model;
        } else {
            self.entries.push((alias, model));
        }
    }

    /// Resolves a UI alias to the provider model id.
    pub fn resolve(&self, alias: &str) -> Result<&str, SmartBotError> {
        self.entries
            .iter()
            .find(|(a, _)| a == alias)
            .map(|(_, m)| m.as_str())
            .ok_or_else(|| {
                SmartBotError::InvalidRequest(format!("Unknown model selection: {alias}"))
            })
    }

    /// The aliases offered to the UI, in insertion order.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(a, _)| a.as_str())
    }
}

impl Default for ModelMapping {
    fn default() -> Self {
        Self::defaults()
    }
}
