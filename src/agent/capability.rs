//! The capability interface implemented by every agent tool.
//!
//! A capability is one invokable agent action: it carries a protocol-visible
//! name, a documentation string, a JSON-schema parameter contract, and a
//! synchronous execution method. The MCP adaptation layer in
//! [`crate::core::adapter`] consumes capabilities exclusively through this
//! trait.

use std::sync::Arc;

use rmcp::model::JsonObject;
use thiserror::Error;

/// Errors that can occur while executing a capability.
#[derive(Debug, Error)]
pub enum CapabilityError {
    /// The provided arguments did not match the capability's schema.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A client-supplied path escaped the project root.
    #[error("Path security violation: {0}")]
    PathSecurity(#[from] super::paths::PathSecurityError),

    /// I/O failure while executing the capability.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The capability ran but could not produce a result.
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

impl CapabilityError {
    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a new "execution failed" error.
    pub fn execution_failed(msg: impl Into<String>) -> Self {
        Self::ExecutionFailed(msg.into())
    }
}

/// One invokable agent action.
///
/// Implementations execute synchronously; long-running work blocks the
/// serving loop for its duration, which is the capability's responsibility
/// to keep bounded.
pub trait Capability: Send + Sync {
    /// The tool name as registered with the protocol server.
    fn name(&self) -> &str;

    /// Human-readable documentation shown to clients.
    ///
    /// Returns the empty string when the capability has no documentation;
    /// the adaptation layer passes it through verbatim.
    fn description(&self) -> &str;

    /// JSON schema describing the capability's parameters.
    fn input_schema(&self) -> Arc<JsonObject>;

    /// Execute the capability with the given named arguments.
    fn apply(&self, args: JsonObject) -> Result<String, CapabilityError>;
}

/// Deserialize a capability's parameter struct from the raw argument map.
pub(crate) fn parse_args<P: serde::de::DeserializeOwned>(
    args: JsonObject,
) -> Result<P, CapabilityError> {
    serde_json::from_value(serde_json::Value::Object(args))
        .map_err(|e| CapabilityError::invalid_arguments(e.to_string()))
}
