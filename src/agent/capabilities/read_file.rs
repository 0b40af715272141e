//! Read file capability.
//!
//! Reads a file inside the project root, optionally restricted to a line
//! range.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::agent::capability::{Capability, CapabilityError, parse_args};
use crate::agent::paths::resolve_in_root;

/// Parameters for the read file capability.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ReadFileParams {
    /// Path of the file to read, relative to the project root.
    pub relative_path: String,

    /// First line to include (1-based). Defaults to the start of the file.
    #[serde(default)]
    pub start_line: Option<usize>,

    /// Last line to include (1-based, inclusive). Defaults to the end of the file.
    #[serde(default)]
    pub end_line: Option<usize>,
}

/// Reads a file within the project tree.
pub struct ReadFileCapability {
    root: PathBuf,
}

impl ReadFileCapability {
    pub const NAME: &'static str = "read_file";

    pub const DESCRIPTION: &'static str =
        "Read a file within the project directory, optionally restricted to a line range.";

    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }
}

impl Capability for ReadFileCapability {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        Self::DESCRIPTION
    }

    fn input_schema(&self) -> Arc<JsonObject> {
        cached_schema_for_type::<ReadFileParams>()
    }

    fn apply(&self, args: JsonObject) -> Result<String, CapabilityError> {
        let params: ReadFileParams = parse_args(args)?;
        let path = resolve_in_root(&self.root, &params.relative_path)?;

        if !path.is_file() {
            return Err(CapabilityError::execution_failed(format!(
                "Not a file: {}",
                params.relative_path
            )));
        }

        let contents = fs::read_to_string(&path)?;

        match (params.start_line, params.end_line) {
            (None, None) => Ok(contents),
            (start, end) => {
                let start = start.unwrap_or(1).max(1);
                let selected: Vec<&str> = contents
                    .lines()
                    .enumerate()
                    .filter(|(i, _)| {
                        let line_no = i + 1;
                        line_no >= start && end.is_none_or(|e| line_no <= e)
                    })
                    .map(|(_, line)| line)
                    .collect();
                Ok(selected.join("\n"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn args(value: serde_json::Value) -> JsonObject {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_read_whole_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("hello.txt"), "line one\nline two\n").unwrap();

        let capability = ReadFileCapability::new(temp_dir.path().to_path_buf());
        let result = capability
            .apply(args(json!({ "relative_path": "hello.txt" })))
            .unwrap();

        assert_eq!(result, "line one\nline two\n");
    }

    #[test]
    fn test_read_line_range() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("hello.txt"), "a\nb\nc\nd\n").unwrap();

        let capability = ReadFileCapability::new(temp_dir.path().to_path_buf());
        let result = capability
            .apply(args(json!({
                "relative_path": "hello.txt",
                "start_line": 2,
                "end_line": 3
            })))
            .unwrap();

        assert_eq!(result, "b\nc");
    }

    #[test]
    fn test_read_outside_root_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let project = temp_dir.path().join("project");
        std::fs::create_dir(&project).unwrap();
        std::fs::write(temp_dir.path().join("secret.txt"), "secret").unwrap();

        let capability = ReadFileCapability::new(project);
        let result = capability.apply(args(json!({ "relative_path": "../secret.txt" })));

        assert!(matches!(result, Err(CapabilityError::PathSecurity(_))));
    }

    #[test]
    fn test_missing_argument_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let capability = ReadFileCapability::new(temp_dir.path().to_path_buf());

        let result = capability.apply(args(json!({ "start_line": 1 })));
        assert!(matches!(result, Err(CapabilityError::InvalidArguments(_))));
    }

    #[test]
    fn test_schema_is_object() {
        let temp_dir = TempDir::new().unwrap();
        let capability = ReadFileCapability::new(temp_dir.path().to_path_buf());

        let schema = capability.input_schema();
        assert_eq!(
            schema.get("type").and_then(|v| v.as_str()),
            Some("object")
        );
    }
}
