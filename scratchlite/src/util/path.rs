//! Lexical path resolution.
//!
//! The control plane runs with its own working directory, so every path
//! handed to it must already be absolute.

use scratchlite_shared::errors::{ScratchError, ScratchResult};
use std::path::{Component, Path, PathBuf};

/// Resolve `path` to an absolute path using the current working directory.
///
/// Resolution is purely lexical: `.` and `..` components are folded, symlinks
/// are not followed and the path does not need to exist.
pub fn absolute_path(path: &Path) -> ScratchResult<PathBuf> {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = std::env::current_dir().map_err(|e| ScratchError::path_resolution(path, e))?;
        cwd.join(path)
    };
    Ok(clean(&joined))
}

/// Resolve `path` and convert it to a `String` argument.
pub fn absolute_path_arg(path: &Path) -> ScratchResult<String> {
    path_arg(&absolute_path(path)?)
}

/// Convert `path` to a `String` argument without resolving it.
pub fn path_arg(path: &Path) -> ScratchResult<String> {
    path.to_str().map(str::to_string).ok_or_else(|| {
        ScratchError::InvalidArgument(format!("path is not valid UTF-8: {}", path.display()))
    })
}

fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            // Popping the root is a no-op, so "/.." stays "/"
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_path_joins_cwd() {
        let cwd = std::env::current_dir().unwrap();
        let abs = absolute_path(Path::new("cache.vhdx")).unwrap();
        assert_eq!(abs, cwd.join("cache.vhdx"));
        assert!(abs.is_absolute());
    }

    #[test]
    fn test_dot_components_are_folded() {
        let cwd = std::env::current_dir().unwrap();
        let abs = absolute_path(Path::new("./a/../b/./c.vhdx")).unwrap();
        assert_eq!(abs, cwd.join("b").join("c.vhdx"));
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_path_is_cleaned_not_rebased() {
        let abs = absolute_path(Path::new("/var/lib/../cache//scratch.vhdx")).unwrap();
        assert_eq!(abs, PathBuf::from("/var/cache/scratch.vhdx"));
    }

    #[cfg(unix)]
    #[test]
    fn test_parent_of_root_stays_root() {
        let abs = absolute_path(Path::new("/../../x")).unwrap();
        assert_eq!(abs, PathBuf::from("/x"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_is_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"/run/\xffscratch"));
        assert!(matches!(path_arg(path), Err(ScratchError::InvalidArgument(_))));
        assert!(matches!(
            absolute_path_arg(path),
            Err(ScratchError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_missing_file_still_resolves() {
        let abs = absolute_path(Path::new("definitely/not/here.vhdx")).unwrap();
        assert!(abs.ends_with("definitely/not/here.vhdx"));
    }
}
