//! Process-wide agent registry.
//!
//! Maps project file paths to their agent instances. Agents are constructed
//! lazily on first lookup and live until the shutdown sweep; there is no
//! eviction and no capacity bound. The whole check-then-insert sequence runs
//! under the registry lock, so concurrent lookups of the same unseen path
//! cannot construct two agents.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{error, info};

use super::{Agent, AgentError};

/// Keyed cache of agents, one per project file path.
pub struct AgentRegistry {
    agents: Mutex<HashMap<PathBuf, Arc<Agent>>>,
}

impl AgentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            agents: Mutex::new(HashMap::new()),
        }
    }

    /// Return the agent for the given project file, constructing it on
    /// first lookup.
    ///
    /// Repeated lookups with the same path return the same handle; the
    /// backend is started only during construction.
    pub fn get_or_create(&self, project_file: &Path) -> Result<Arc<Agent>, AgentError> {
        let mut agents = self.lock_agents();

        if let Some(agent) = agents.get(project_file) {
            info!(
                "Reusing existing agent for project file: {}",
                project_file.display()
            );
            return Ok(agent.clone());
        }

        info!(
            "Creating new agent for project file: {}",
            project_file.display()
        );
        let agent = Arc::new(Agent::new(project_file, true)?);
        agents.insert(project_file.to_path_buf(), agent.clone());
        Ok(agent)
    }

    /// Stop the language backend of every registered agent.
    ///
    /// Iterates the registry contents at call time, so agents registered
    /// after server startup are included. A backend that fails to stop is
    /// logged and does not prevent the remaining agents from being released.
    pub fn shutdown_all(&self) {
        let agents: Vec<(PathBuf, Arc<Agent>)> = self.lock_agents().drain().collect();

        for (project_file, agent) in agents {
            info!(
                "Stopping language backend for project file: {}",
                project_file.display()
            );
            if let Err(e) = agent.backend().stop() {
                error!(
                    "Failed to stop language backend for {}: {}",
                    project_file.display(),
                    e
                );
            }
        }
    }

    /// Number of registered agents.
    pub fn len(&self) -> usize {
        self.lock_agents().len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.lock_agents().is_empty()
    }

    fn lock_agents(&self) -> std::sync::MutexGuard<'_, HashMap<PathBuf, Arc<Agent>>> {
        self.agents.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}
