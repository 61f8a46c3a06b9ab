//! Launchable application discovery.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

/// List executable regular files directly inside `dir`, sorted by path.
///
/// An unreadable or missing directory yields an empty list.
pub fn scan_apps(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(dir = %dir.display(), error = %e, "cannot read apps directory");
            return Vec::new();
        }
    };

    let mut apps: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_executable(path))
        .collect();
    apps.sort();
    apps
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    fs::metadata(path)
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    fn write_file(dir: &Path, name: &str, mode: u32) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn test_only_executable_files() {
        let temp = tempfile::tempdir().unwrap();
        let editor = write_file(temp.path(), "editor", 0o755);
        let browser = write_file(temp.path(), "browser", 0o700);
        write_file(temp.path(), "README", 0o644);
        fs::create_dir(temp.path().join("subdir")).unwrap();

        assert_eq!(scan_apps(temp.path()), vec![browser, editor]);
    }

    #[test]
    fn test_missing_directory() {
        let temp = tempfile::tempdir().unwrap();
        assert!(scan_apps(&temp.path().join("nope")).is_empty());
    }
}
