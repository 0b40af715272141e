//! Server lifecycle management.
//!
//! Runs the stdio serve loop and guarantees that the agent registry's
//! shutdown sweep executes no matter how the loop exits. Stdout carries the
//! protocol stream; every diagnostic goes to stderr via tracing.

use std::sync::Arc;

use rmcp::ServiceExt;
use tracing::info;

use crate::agent::AgentRegistry;

use super::error::{Error, Result};
use super::server::AgentServer;

/// Serve the MCP protocol over stdin/stdout until the client disconnects,
/// then stop every registered agent's language backend.
///
/// The sweep covers the registry contents at shutdown time, so agents
/// registered after the server started serving are included.
pub async fn serve_stdio(server: AgentServer, registry: Arc<AgentRegistry>) -> Result<()> {
    info!("Ready - communicating via stdin/stdout");

    let outcome = run(server).await;

    info!("Run loop exited; stopping {} agent(s)", registry.len());
    registry.shutdown_all();

    outcome
}

async fn run(server: AgentServer) -> Result<()> {
    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| Error::transport(e.to_string()))?;

    service
        .waiting()
        .await
        .map_err(|e| Error::transport(e.to_string()))?;

    Ok(())
}
