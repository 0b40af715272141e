//! The project-scoped coding agent.
//!
//! An [`Agent`] owns the capability set for one project configuration plus
//! the language-analysis backend that serves it. Agents are constructed
//! lazily through the [`AgentRegistry`] and torn down by the server's
//! shutdown sweep.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::info;

mod backend;
mod capability;
pub mod capabilities;
mod paths;
mod project;
mod registry;

pub use backend::{BackendError, LanguageServerBackend};
pub use capability::{Capability, CapabilityError};
pub use paths::{PathSecurityError, resolve_in_root};
pub use project::{ProjectConfig, ProjectError};
pub use registry::AgentRegistry;

/// Errors that can occur while constructing an agent.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The project configuration could not be loaded.
    #[error(transparent)]
    Project(#[from] ProjectError),

    /// The language backend could not be started.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// A stateful agent serving one project configuration.
pub struct Agent {
    project_file: PathBuf,
    name: String,
    root: PathBuf,
    capabilities: HashMap<String, Arc<dyn Capability>>,
    backend: LanguageServerBackend,
}

impl Agent {
    /// Construct an agent for the given project file.
    ///
    /// Loads the project configuration, builds the capability set, and
    /// starts the language backend when `start_backend` is true.
    pub fn new(project_file: &Path, start_backend: bool) -> Result<Self, AgentError> {
        let config = ProjectConfig::load(project_file)?;
        let name = config.resolved_name(project_file);
        let root = config.resolved_root(project_file);

        let capability_set: Vec<Arc<dyn Capability>> = vec![
            Arc::new(capabilities::ReadFileCapability::new(root.clone())),
            Arc::new(capabilities::ListDirCapability::new(
                root.clone(),
                config.ignored_dirs.clone(),
            )),
            Arc::new(capabilities::SearchPatternCapability::new(
                root.clone(),
                config.ignored_dirs.clone(),
            )),
        ];
        let capabilities = capability_set
            .into_iter()
            .map(|c| (c.name().to_string(), c))
            .collect();

        let backend = LanguageServerBackend::new(config.language_server_command.clone());
        if start_backend {
            backend.start()?;
        }

        info!(
            "Agent for project '{}' ready with root {}",
            name,
            root.display()
        );

        Ok(Self {
            project_file: project_file.to_path_buf(),
            name,
            root,
            capabilities,
            backend,
        })
    }

    /// The capability set, keyed by capability name.
    pub fn capabilities(&self) -> &HashMap<String, Arc<dyn Capability>> {
        &self.capabilities
    }

    /// The attached language-analysis backend.
    pub fn backend(&self) -> &LanguageServerBackend {
        &self.backend
    }

    /// The project name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The project root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The project file this agent was constructed from.
    pub fn project_file(&self) -> &Path {
        &self.project_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_project_file(dir: &TempDir, name: &str) -> PathBuf {
        let path = dir.path().join(format!("{name}.yml"));
        fs::write(&path, "language: rust\n").unwrap();
        path
    }

    #[test]
    fn test_agent_has_expected_capabilities() {
        let temp_dir = TempDir::new().unwrap();
        let project_file = write_project_file(&temp_dir, "demo");

        let agent = Agent::new(&project_file, false).unwrap();

        let names: Vec<&str> = agent.capabilities().keys().map(String::as_str).collect();
        assert_eq!(agent.capabilities().len(), 3);
        assert!(names.contains(&"read_file"));
        assert!(names.contains(&"list_dir"));
        assert!(names.contains(&"search_for_pattern"));
    }

    #[test]
    fn test_agent_starts_backend_when_requested() {
        let temp_dir = TempDir::new().unwrap();
        let project_file = write_project_file(&temp_dir, "demo");

        let agent = Agent::new(&project_file, true).unwrap();
        assert!(agent.backend().is_running());

        let idle = Agent::new(&project_file, false).unwrap();
        assert!(!idle.backend().is_running());
    }

    #[test]
    fn test_agent_name_defaults_to_file_stem() {
        let temp_dir = TempDir::new().unwrap();
        let project_file = write_project_file(&temp_dir, "my-project");

        let agent = Agent::new(&project_file, false).unwrap();
        assert_eq!(agent.name(), "my-project");
        assert_eq!(agent.root(), temp_dir.path());
    }

    #[test]
    fn test_missing_project_file_fails() {
        let result = Agent::new(Path::new("/nonexistent/proj.yml"), false);
        assert!(matches!(result, Err(AgentError::Project(_))));
    }
}
