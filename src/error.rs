use std::fmt;

/// Error types that can occur when running the assistant or its collaborators.
#[derive(Debug)]
pub enum SmartBotError {
    /// HTTP request/response errors
    HttpError(String),
    /// Authentication and authorization errors
    AuthError(String),
    /// Invalid request parameters or format (e.g. zero-sized canvas)
    InvalidRequest(String),
    /// Errors returned by a collaborator service
    ProviderError(String),
    /// JSON serialization/deserialization errors
    JsonError(String),
    /// Image encoding/decoding errors
    ImageError(String),
}

impl fmt::Display for SmartBotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmartBotError::HttpError(e) => write!(f, "HTTP Error: {}", e),
            SmartBotError::AuthError(e) => write!(f, "Auth Error: {}", e),
            SmartBotError::InvalidRequest(e) => write!(f, "Invalid Request: {}", e),
            SmartBotError::ProviderError(e) => write!(f, "Provider Error: {}", e),
            SmartBotError::JsonError(e) => write!(f, "JSON Parse Error: {}", e),
            SmartBotError::ImageError(e) => write!(f, "Image Error: {}", e),
        }
    }
}

impl std::error::Error for SmartBotError {}

/// Converts reqwest HTTP errors into SmartBotErrors
impl From<reqwest::Error> for SmartBotError {
    fn from(err: reqwest::Error) -> Self {
        SmartBotError::HttpError(err.to_string())
    }
}

/// Converts image codec errors into SmartBotErrors
impl From<image::ImageError> for SmartBotError {
    fn from(err: image::ImageError) -> Self {
        SmartBotError::ImageError(err.to_string())
    }
}
