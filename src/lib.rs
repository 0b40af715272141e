//! Coding-Agent MCP Server Library
//!
//! This crate bridges a project-scoped coding agent's tools to the Model
//! Context Protocol so that any MCP client can discover and invoke them.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, capability-to-tool adaptation,
//!   the server handler, and the serve/shutdown lifecycle
//! - **agent**: The agent itself - project configuration, the capability
//!   set, the language-analysis backend, and the process-wide agent registry
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use agent_mcp_server::agent::AgentRegistry;
//! use agent_mcp_server::core::{AgentServer, Config, serve_stdio};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let registry = Arc::new(AgentRegistry::new());
//!     let agent = registry.get_or_create(Path::new("project.yml"))?;
//!     let server = AgentServer::new(Config::from_env(), &agent)?;
//!     serve_stdio(server, registry).await?;
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod core;

// Re-export commonly used types for convenience
pub use agent::{Agent, AgentRegistry, Capability};
pub use crate::core::{AgentServer, Config, Error, Result};
