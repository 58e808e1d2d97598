//! Re-exports from all modules

pub mod client;
pub mod config;
pub mod gate;
pub mod message;
pub mod prompt;
pub mod store;

use thiserror::Error;

/// Result type for prizedesk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for prizedesk operations
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error (missing credential or identifier)
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Upstream completion endpoint returned a non-2xx status
    #[error("completion API returned {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    /// Upstream completion endpoint returned 2xx but no extractable text
    #[error("completion API returned empty content. Full response: {0}")]
    EmptyContent(String),

    /// Record store returned a non-2xx status
    #[error("record store returned {status}: {body}")]
    StoreStatus { status: u16, body: String },
}

pub use client::CompletionClient;
pub use config::{AppConfig, LlmConfig, ServerConfig, StoreConfig};
pub use message::{ContentPart, Message, MessageContent, MessageRole};
pub use prompt::InferenceRequest;
pub use store::{Award, Collection, Requirement, StoreClient};
