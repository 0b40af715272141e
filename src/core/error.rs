//! Error types and handling for the MCP server.
//!
//! This module defines a unified error type covering agent construction,
//! capability adaptation, and transport failures. Per-call capability
//! failures never reach this type: they are absorbed into textual tool
//! results by the invocation thunk in [`crate::core::adapter`].

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// The agent could not be constructed.
    #[error("Agent error: {0}")]
    Agent(#[from] crate::agent::AgentError),

    /// A capability could not be adapted into a tool descriptor.
    /// This indicates a programming defect in the agent layer and is fatal
    /// at bind time.
    #[error("Capability adaptation error: {0}")]
    Adaptation(String),

    /// The stdio transport failed to initialize or terminated abnormally.
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O errors from file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a new adaptation error.
    pub fn adaptation(msg: impl Into<String>) -> Self {
        Self::Adaptation(msg.into())
    }

    /// Create a new transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }
}
