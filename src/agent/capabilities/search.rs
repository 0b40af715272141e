//! Pattern search capability.
//!
//! Scans project files for a substring and reports matching lines as
//! `path:line: text`. Binary files and ignored directories are skipped, and
//! the number of reported matches is bounded.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::JsonObject;
use schemars::JsonSchema;
use serde::Deserialize;
use walkdir::WalkDir;

use crate::agent::capability::{Capability, CapabilityError, parse_args};
use crate::agent::paths::resolve_in_root;

/// Hard cap on reported matches, to keep responses bounded.
const MAX_MATCHES: usize = 200;

/// Parameters for the pattern search capability.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchPatternParams {
    /// Substring to search for.
    pub pattern: String,

    /// Directory to search in, relative to the project root.
    /// Defaults to the project root.
    #[serde(default)]
    pub relative_path: Option<String>,
}

/// Searches project files for a substring.
pub struct SearchPatternCapability {
    root: PathBuf,
    ignored_dirs: Vec<String>,
}

impl SearchPatternCapability {
    pub const NAME: &'static str = "search_for_pattern";

    pub const DESCRIPTION: &'static str =
        "Search project files for a substring and return matching lines as path:line: text.";

    pub fn new(root: PathBuf, ignored_dirs: Vec<String>) -> Self {
        Self { root, ignored_dirs }
    }
}

impl Capability for SearchPatternCapability {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn description(&self) -> &str {
        Self::DESCRIPTION
    }

    fn input_schema(&self) -> Arc<JsonObject> {
        cached_schema_for_type::<SearchPatternParams>()
    }

    fn apply(&self, args: JsonObject) -> Result<String, CapabilityError> {
        let params: SearchPatternParams = parse_args(args)?;
        if params.pattern.is_empty() {
            return Err(CapabilityError::invalid_arguments(
                "pattern must not be empty",
            ));
        }

        let base = params.relative_path.as_deref().unwrap_or(".");
        let dir = resolve_in_root(&self.root, base)?;

        let mut matches: Vec<(String, usize, String)> = Vec::new();
        let mut truncated = false;

        let walker = WalkDir::new(&dir).min_depth(1).into_iter().filter_entry(|e| {
            let name = e.file_name().to_string_lossy();
            !(e.file_type().is_dir() && self.ignored_dirs.iter().any(|d| d == &*name))
        });

        'files: for entry in walker.flatten() {
            if !entry.file_type().is_file() {
                continue;
            }
            // Non-UTF-8 files are treated as binary and skipped.
            let Ok(contents) = fs::read_to_string(entry.path()) else {
                continue;
            };
            let display = entry
                .path()
                .strip_prefix(&dir)
                .unwrap_or(entry.path())
                .to_string_lossy()
                .into_owned();

            for (i, line) in contents.lines().enumerate() {
                if line.contains(&params.pattern) {
                    if matches.len() >= MAX_MATCHES {
                        truncated = true;
                        break 'files;
                    }
                    matches.push((display.clone(), i + 1, line.trim_end().to_string()));
                }
            }
        }

        // Sort on (path, line number) so per-file matches stay in line order.
        matches.sort();

        let lines: Vec<String> = matches
            .iter()
            .map(|(path, line_no, text)| format!("{path}:{line_no}: {text}"))
            .collect();

        let mut response = format!("{} matches for \"{}\"\n", matches.len(), params.pattern);
        response.push_str(&lines.join("\n"));
        if truncated {
            response.push_str(&format!("\n\n(Truncated at {MAX_MATCHES} matches)"));
        }
        Ok(response)
    }
}
