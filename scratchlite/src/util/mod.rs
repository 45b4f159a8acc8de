use std::path::{Path, PathBuf};

use scratchlite_shared::constants::binary::RUNTIME_DIR_ENV;
use scratchlite_shared::errors::{ScratchError, ScratchResult};

pub mod path;

pub use path::{absolute_path, absolute_path_arg, path_arg};

/// Find the control-plane binary in common locations.
///
/// Search order:
/// 1. `explicit`, if given (no fallback when it is missing)
/// 2. `$SCRATCHLITE_RUNTIME_DIR/<binary_name>`
/// 3. every directory in `PATH`
///
/// # Returns
/// * `Ok(PathBuf)` - Path to the found binary
/// * `Err(...)` - Binary not found in any expected location
pub fn find_binary(binary_name: &str, explicit: Option<&Path>) -> ScratchResult<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(explicit) = explicit {
        candidates.push(explicit.to_path_buf());
    } else {
        if let Ok(runtime_dir) = std::env::var(RUNTIME_DIR_ENV) {
            candidates.push(PathBuf::from(runtime_dir).join(binary_name));
        }

        if let Some(paths) = std::env::var_os("PATH") {
            candidates.extend(std::env::split_paths(&paths).map(|dir| dir.join(binary_name)));
        }
    }

    for candidate in &candidates {
        tracing::trace!("Finding binary {:?} in path: {:?}", binary_name, candidate);
        if candidate.is_file() {
            tracing::debug!(binary = %candidate.display(), "Found binary");
            return Ok(candidate.clone());
        }
    }

    let locations = candidates
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ScratchError::NotFound(format!(
        "Binary '{}' not found.\nSearched locations:\n{}",
        binary_name, locations
    )))
}
