//! Built-in project-scoped capabilities.
//!
//! One file per capability. Each capability defines its schemars-derived
//! parameter struct and implements [`crate::agent::Capability`]; the MCP
//! adaptation layer never sees anything beyond that trait.

mod list_dir;
mod read_file;
mod search;

pub use list_dir::ListDirCapability;
pub use read_file::ReadFileCapability;
pub use search::SearchPatternCapability;
