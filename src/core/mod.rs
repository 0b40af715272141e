//! Core module containing shared infrastructure components.
//!
//! This module provides the foundational building blocks for the MCP
//! server: configuration, error handling, capability adaptation, the
//! server handler, and the serve/shutdown lifecycle.

pub mod adapter;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod server;

pub use adapter::{build_tool_router, make_tool};
pub use config::Config;
pub use error::{Error, Result};
pub use lifecycle::serve_stdio;
pub use server::AgentServer;
