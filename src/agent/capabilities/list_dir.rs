//! List directory capability.
//!
//! Lists entries of a directory inside the project root, optionally
//! recursing into subdirectories. Ignored directories from the project
//! configuration are skipped.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::Deserialize;
use walkdir::WalkDir;

use crate::agent::capability::{Capability, CapabilityError, parse_args};
use crate::agent::paths::resolve_in_root;

/// Parameters for the list directory capability.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListDirParams {
    /// Path of the directory to list, relative to the project root.
    /// Use "." for the project root itself.
    pub relative_path: String,

    /// Recurse into subdirectories.
    #[serde(default)]
    pub recursive: bool,
}

/// Lists files and directories within the project tree.
pub struct ListDirCapability {
    root: PathBuf,
    ignored_dirs: Vec<String>,
}

impl ListDirCapability {
    pub const NAME: &'static str = "list_dir";

    pub const DESCRIPTION: &'static str =
        "List files and directories within the project, optionally recursively. \
         Ignored directories (VCS metadata, build output) are skipped.";

    pub fn new(root: PathBuf, ignored_dirs: Vec<String>) -> Self {
        Self { root, ignored_dirs }
    }

    fn is_ignored(&self, entry_name: &str) -> bool {
        self.ignored_dirs.iter().any(|d| d == entry_name)
    }
}

impl Capability for ListDirCapability {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        Self::DESCRIPTION
    }

    fn input_schema(&self) -> Arc<JsonObject> {
        cached_schema_for_type::<ListDirParams>()
    }

    fn apply(&self, args: JsonObject) -> Result<String, CapabilityError> {
        let params: ListDirParams = parse_args(args)?;
        let dir = resolve_in_root(&self.root, &params.relative_path)?;

        if !dir.is_dir() {
            return Err(CapabilityError::execution_failed(format!(
                "Not a directory: {}",
                params.relative_path
            )));
        }

        let max_depth = if params.recursive { usize::MAX } else { 1 };
        let mut lines = Vec::new();

        let walker = WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(max_depth)
            .into_iter()
            .filter_entry(|e| {
                let name = e.file_name().to_string_lossy();
                !(e.file_type().is_dir() && self.is_ignored(&name))
            });

        for entry in walker {
            let entry = entry.map_err(|e| CapabilityError::execution_failed(e.to_string()))?;
            let display = relative_display(entry.path(), &dir);
            if entry.file_type().is_dir() {
                lines.push(format!("{display}/"));
            } else {
                lines.push(display);
            }
        }

        lines.sort();

        let mut response = format!("Directory: {}\n", params.relative_path);
        response.push_str(&lines.join("\n"));
        response.push_str(&format!("\n\nTotal: {} entries", lines.len()));
        Ok(response)
    }
}

fn relative_display(path: &Path, base: &Path) -> String {
    path.strip_prefix(base)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}
