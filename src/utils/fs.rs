use crate::error::{AgetError, Result};
use std::path::{Path, PathBuf};

/// Create `path` and any missing parents.
///
/// An entry that already exists counts as success, whatever it is.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    match std::fs::create_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(()),
        Err(e) => Err(AgetError::DirectoryCreation {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Replace a leading `~` with the user's home directory.
pub fn expand_home(path: &str) -> Result<PathBuf> {
    if path == "~" {
        return dirs::home_dir().ok_or(AgetError::HomeDirectoryNotFound);
    }

    match path
        .strip_prefix("~/")
        .or_else(|| path.strip_prefix("~\\"))
    {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .ok_or(AgetError::HomeDirectoryNotFound),
        None => Ok(PathBuf::from(path)),
    }
}

/// Expand `~` and anchor relative paths at the current directory.
pub fn resolve_absolute(path: &str) -> Result<PathBuf> {
    let expanded = expand_home(path)?;
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(std::env::current_dir()?.join(expanded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_exists_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("Artist").join("Album");

        ensure_dir_exists(&nested).unwrap();
        ensure_dir_exists(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_ensure_dir_exists_reports_path() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();

        let target = blocker.join("child");
        match ensure_dir_exists(&target) {
            Err(AgetError::DirectoryCreation { path, .. }) => assert_eq!(path, target),
            other => panic!("expected DirectoryCreation, got {other:?}"),
        }
    }

    #[test]
    fn test_expand_home() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand_home("~").unwrap(), home);
        assert_eq!(expand_home("~/Music").unwrap(), home.join("Music"));
        assert_eq!(
            expand_home("/srv/music").unwrap(),
            PathBuf::from("/srv/music")
        );
        assert_eq!(expand_home("~user/x").unwrap(), PathBuf::from("~user/x"));
    }

    #[test]
    fn test_resolve_absolute() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(resolve_absolute("music").unwrap(), cwd.join("music"));
        assert!(resolve_absolute("~/Music").unwrap().is_absolute());
    }
}
