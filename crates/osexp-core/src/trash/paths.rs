//! Root and trash-directory path resolution.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Reserved name of the trash directory created under a root.
pub const TRASH_DIR_NAME: &str = ".trash";

/// Resolves the user-supplied trash root to an absolute path.
///
/// `None` or an empty path means the current working directory. Relative
/// roots are joined onto the current directory and `.`/`..` segments are
/// removed lexically; symlinks are left alone. Never fails.
pub fn resolve_root(user_root: Option<&Path>) -> PathBuf {
    match user_root {
        Some(root) if !root.as_os_str().is_empty() => absolutize(root),
        _ => current_dir(),
    }
}

/// Returns `<root>/.trash`. Pure, no I/O.
pub fn trash_dir_for(root: &Path) -> PathBuf {
    root.join(TRASH_DIR_NAME)
}

/// Makes `path` absolute against the current directory and normalizes it lexically.
pub fn absolutize(path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&current_dir().join(path))
    }
}

fn current_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|e| {
        tracing::warn!("cannot read current directory, using '.': {e}");
        PathBuf::from(".")
    })
}

/// Removes `.` and `..` segments without touching the filesystem.
///
/// `..` at the root stays at the root, matching how the kernel resolves
/// `/..`.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !out.has_root() {
                    out.push(component);
                }
            }
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                out.push(component)
            }
        }
    }
    out
}

/// Resolves `path` the way the kernel does, except for its last component.
///
/// The parent is canonicalized, so `link/..` lands where the symlink points
/// rather than where the text suggests. The final name is joined back
/// unresolved, so a symlink names the link itself. Paths without a final
/// name (`.`, `..`, `/`) are canonicalized whole.
pub fn physical_path(path: &Path) -> io::Result<PathBuf> {
    let Some(name) = path.file_name() else {
        return fs::canonicalize(path);
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    Ok(fs::canonicalize(parent)?.join(name))
}

/// Returns the last path component of `path` after stripping trailing separators.
///
/// `Path::file_name` already ignores a trailing `/`, but returns `None` for
/// paths ending in `..` or `.`; those are resolved through [`absolutize`]
/// first.
pub fn base_name(path: &Path) -> Option<String> {
    let name = match path.file_name() {
        Some(name) => name.to_os_string(),
        None => absolutize(path).file_name()?.to_os_string(),
    };
    Some(name.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trash_dir_is_joined_under_root() {
        assert_eq!(
            trash_dir_for(Path::new("/tmp/ws")),
            PathBuf::from("/tmp/ws/.trash")
        );
    }

    #[test]
    fn resolve_root_defaults_to_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(resolve_root(None), cwd);
        assert_eq!(resolve_root(Some(Path::new(""))), cwd);
    }

    #[test]
    fn resolve_root_keeps_absolute_path() {
        assert_eq!(
            resolve_root(Some(Path::new("/tmp/ws"))),
            PathBuf::from("/tmp/ws")
        );
    }

    #[test]
    fn resolve_root_strips_dot_segments() {
        assert_eq!(
            resolve_root(Some(Path::new("/tmp/./ws/sub/../other"))),
            PathBuf::from("/tmp/ws/other")
        );
    }

    #[test]
    fn resolve_root_relative_joins_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(resolve_root(Some(Path::new("data"))), cwd.join("data"));
    }

    #[test]
    fn parent_of_root_stays_at_root() {
        assert_eq!(absolutize(Path::new("/../x")), PathBuf::from("/x"));
    }

    #[cfg(unix)]
    #[test]
    fn physical_path_resolves_parent_but_not_leaf() {
        let tmp = tempfile::TempDir::new().unwrap();
        let base = fs::canonicalize(tmp.path()).unwrap();
        fs::create_dir_all(base.join("real").join("sub")).unwrap();
        std::os::unix::fs::symlink(base.join("real").join("sub"), base.join("link")).unwrap();

        assert_eq!(
            physical_path(&base.join("link").join("..").join("f")).unwrap(),
            base.join("real").join("f")
        );
        assert_eq!(physical_path(&base.join("link")).unwrap(), base.join("link"));
        assert_eq!(
            physical_path(&base.join("real").join("sub").join("..")).unwrap(),
            base.join("real")
        );
    }

    #[test]
    fn physical_path_missing_parent_is_not_found() {
        let err = physical_path(Path::new("/no/such/dir/file")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn base_name_ignores_trailing_separator() {
        assert_eq!(base_name(Path::new("/tmp/ws/photos/")).as_deref(), Some("photos"));
        assert_eq!(base_name(Path::new("notes.txt")).as_deref(), Some("notes.txt"));
    }

    #[test]
    fn base_name_resolves_dot_dot() {
        assert_eq!(base_name(Path::new("/tmp/ws/a/..")).as_deref(), Some("ws"));
    }

    #[test]
    fn base_name_of_root_is_none() {
        assert_eq!(base_name(Path::new("/")), None);
    }
}
