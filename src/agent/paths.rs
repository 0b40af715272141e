//! Project-root path validation.
//!
//! Every filesystem capability takes paths relative to the agent's project
//! root. This module resolves and canonicalizes those paths, rejecting
//! anything that escapes the root (absolute paths, `..` traversal, symlinks
//! pointing outside).

use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur during path validation.
#[derive(Debug, thiserror::Error)]
pub enum PathSecurityError {
    #[error("Path '{path}' is outside the project root '{root}'")]
    OutsideProjectRoot { path: PathBuf, root: PathBuf },

    #[error("Absolute paths are not allowed: '{path}'")]
    AbsolutePath { path: PathBuf },

    #[error("Path does not exist: '{path}'")]
    PathNotFound { path: PathBuf },

    #[error("Cannot canonicalize path '{path}': {error}")]
    CannotCanonicalize { path: PathBuf, error: io::Error },
}

/// Resolve a client-supplied relative path against the project root.
///
/// The joined path is canonicalized (resolving `.`, `..`, and symlinks) and
/// then checked against the canonical root, so traversal sequences cannot
/// escape the project.
///
/// Returns the canonicalized path on success.
pub fn resolve_in_root(root: &Path, relative: &str) -> Result<PathBuf, PathSecurityError> {
    let relative = Path::new(relative);

    if relative.is_absolute() {
        return Err(PathSecurityError::AbsolutePath {
            path: relative.to_path_buf(),
        });
    }

    let canonical_root = root
        .canonicalize()
        .map_err(|e| PathSecurityError::CannotCanonicalize {
            path: root.to_path_buf(),
            error: e,
        })?;

    let joined = canonical_root.join(relative);

    let canonical = joined.canonicalize().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            PathSecurityError::PathNotFound { path: joined.clone() }
        } else {
            PathSecurityError::CannotCanonicalize {
                path: joined.clone(),
                error: e,
            }
        }
    })?;

    if !canonical.starts_with(&canonical_root) {
        return Err(PathSecurityError::OutsideProjectRoot {
            path: canonical,
            root: canonical_root,
        });
    }

    Ok(canonical)
}
