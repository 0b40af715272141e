//! MCP server handler.
//!
//! Implements the `ServerHandler` trait from rmcp; tool calls are routed
//! through the router built from the initially resolved agent's
//! capabilities by [`crate::core::adapter`].

use std::sync::Arc;

use rmcp::{
    ServerHandler, handler::server::tool::ToolRouter, model::ServerCapabilities,
    model::ServerInfo, tool_handler,
};

use crate::agent::Agent;

use super::config::Config;

/// The main MCP server handler.
#[derive(Clone)]
pub struct AgentServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Name of the project served by the initially resolved agent.
    project_name: String,

    /// Tool router handling capability calls.
    tool_router: ToolRouter<Self>,
}

impl AgentServer {
    /// Create a server whose tool table is bound to the given agent's
    /// capabilities.
    ///
    /// Fails if any capability cannot be adapted; a malformed capability is
    /// a programming defect in the agent layer and is fatal at bind time.
    pub fn new(config: Config, agent: &Agent) -> super::error::Result<Self> {
        Ok(Self {
            config: Arc::new(config),
            project_name: agent.name().to_string(),
            tool_router: super::adapter::build_tool_router(agent)?,
        })
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Names of the tools currently bound into the server.
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.into_owned())
            .collect()
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for AgentServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(format!(
                "Coding-agent MCP server for project '{}'. \
                 Exposes the agent's project-scoped tools.",
                self.project_name
            )),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn test_agent(temp_dir: &TempDir) -> Agent {
        let project_file = temp_dir.path().join("demo.yml");
        fs::write(&project_file, "language: rust\n").unwrap();
        Agent::new(&project_file, false).unwrap()
    }

    #[test]
    fn test_server_binds_agent_capabilities() {
        let temp_dir = TempDir::new().unwrap();
        let agent = test_agent(&temp_dir);

        let server = AgentServer::new(Config::default(), &agent).unwrap();
        let mut names = server.tool_names();
        names.sort();

        assert_eq!(names, vec!["list_dir", "read_file", "search_for_pattern"]);
    }

    #[test]
    fn test_server_info_mentions_project() {
        let temp_dir = TempDir::new().unwrap();
        let agent = test_agent(&temp_dir);

        let server = AgentServer::new(Config::default(), &agent).unwrap();
        let info = server.get_info();

        assert!(info.instructions.unwrap().contains("demo"));
        assert!(info.capabilities.tools.is_some());
    }
}
