//! MCP Server Entry Point
//!
//! Takes exactly one argument, the `.yml` project file, resolves the agent
//! for it, binds the agent's tools, and serves MCP over stdin/stdout until
//! the client disconnects. All diagnostics go to stderr; stdout is reserved
//! for protocol traffic.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use agent_mcp_server::agent::AgentRegistry;
use agent_mcp_server::core::{AgentServer, Config, serve_stdio};

#[tokio::main]
async fn main() -> Result<()> {
    // Usage check happens before any logging, agent, or server state exists.
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [project_file] = args.as_slice() else {
        eprintln!();
        eprintln!("Usage: agent_mcp_server <.yml project file>");
        std::process::exit(1);
    };

    let config = Config::from_env();

    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);

    let registry = Arc::new(AgentRegistry::new());
    let agent = registry.get_or_create(Path::new(project_file))?;

    let server = AgentServer::new(config, &agent)?;

    serve_stdio(server, registry).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs are written to stderr; stdout is the MCP communication stream and
/// cannot be used for diagnostics.
fn init_logging(level: &str) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
