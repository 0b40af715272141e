//! Server-level configuration.
//!
//! Project-specific settings live in the YAML project file (see
//! [`crate::agent::ProjectConfig`]); this module only covers the server
//! process itself and is populated from environment variables with
//! sensible defaults.

use serde::{Deserialize, Serialize};

/// Main configuration structure for the MCP server process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "agent-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Variables are prefixed with `AGENT_MCP_`, e.g. `AGENT_MCP_SERVER_NAME`
    /// and `AGENT_MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("AGENT_MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("AGENT_MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config
    }
}
