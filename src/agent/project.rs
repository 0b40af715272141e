//! Project configuration loaded from the YAML project file.
//!
//! The project file path doubles as the agent registry key; this module only
//! cares about its contents: where the project lives, what language it is
//! written in, and how to launch its language-analysis backend.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Format, Yaml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading a project file.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// The project file does not exist.
    #[error("Project file not found: '{0}'")]
    NotFound(PathBuf),

    /// The project file could not be parsed.
    #[error("Failed to parse project file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: Box<figment::Error>,
    },
}

/// Contents of a `.yml` project file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name. Defaults to the project file's stem.
    pub name: Option<String>,

    /// Root directory of the project tree.
    /// Defaults to the directory containing the project file.
    pub project_root: Option<PathBuf>,

    /// Primary language of the project (informational).
    pub language: Option<String>,

    /// Command line used to launch the language-analysis backend.
    /// When absent, the backend runs without an external process.
    pub language_server_command: Option<Vec<String>>,

    /// Directory names excluded from listing and searching.
    #[serde(default = "default_ignored_dirs")]
    pub ignored_dirs: Vec<String>,
}

fn default_ignored_dirs() -> Vec<String> {
    vec![".git".to_string(), "node_modules".to_string(), "target".to_string()]
}

impl ProjectConfig {
    /// Load a project configuration from a YAML project file.
    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        if !path.is_file() {
            return Err(ProjectError::NotFound(path.to_path_buf()));
        }

        Figment::from(Yaml::file(path))
            .extract()
            .map_err(|e| ProjectError::Parse {
                path: path.to_path_buf(),
                source: Box::new(e),
            })
    }

    /// The project name, falling back to the project file's stem.
    pub fn resolved_name(&self, project_file: &Path) -> String {
        self.name.clone().unwrap_or_else(|| {
            project_file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "project".to_string())
        })
    }

    /// The project root, falling back to the project file's directory.
    pub fn resolved_root(&self, project_file: &Path) -> PathBuf {
        self.project_root.clone().unwrap_or_else(|| {
            project_file
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))
        })
    }
}
