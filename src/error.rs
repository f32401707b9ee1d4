//! Error types for Statline.

use thiserror::Error;

/// Library-level error type for Statline operations.
#[derive(Error, Debug)]
pub enum StatlineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A player or record is absent upstream, or the service could not be reached.
    #[error("{0}")]
    NotFound(String),

    /// The data service answered with a document we cannot read.
    #[error("Unexpected response structure: {0}")]
    Schema(String),

    /// The interface description could not be turned into tools.
    #[error("Invalid API specification: {0}")]
    SpecParse(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid tool arguments: {0}")]
    InvalidArguments(String),

    #[error("Agent exceeded maximum iterations ({0})")]
    AgentLoopExceeded(usize),

    #[error("Model error: {0}")]
    Model(String),

    #[error("OpenAI API error: {0}")]
    OpenAI(String),

    #[error("Agent run cancelled")]
    Cancelled,
}

/// Result type alias for Statline operations.
pub type Result<T> = std::result::Result<T, StatlineError>;
