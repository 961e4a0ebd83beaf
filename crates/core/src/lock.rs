use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::LockError;

/// Exclusive run marker. The file's presence signals "a run is active";
/// the guard removes it on drop, so release runs on every exit path of
/// the scope that holds it. A hard kill between acquire and drop leaves
/// a stale marker that has to be removed by hand.
pub struct RunLock {
    path: PathBuf,
}

impl RunLock {
    pub fn acquire(path: &Path) -> Result<Self, LockError> {
        match OpenOptions::new().write(true).create_new(true).open(path) {
            Ok(mut file) => {
                if let Err(e) = writeln!(file, "{}", std::process::id()) {
                    warn!(path = %path.display(), error = %e, "could not record pid in lock file");
                }
                Ok(Self {
                    path: path.to_path_buf(),
                })
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(LockError::AlreadyHeld),
            Err(e) => Err(LockError::Io(e)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            warn!(path = %self.path.display(), error = %e, "failed to remove lock file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_is_exclusive_until_release() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.lock");

        let guard = RunLock::acquire(&path).unwrap();
        assert!(matches!(
            RunLock::acquire(&path),
            Err(LockError::AlreadyHeld)
        ));

        drop(guard);
        assert!(!path.exists());
        let _again = RunLock::acquire(&path).unwrap();
    }

    #[test]
    fn marker_records_the_holder_pid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.lock");

        let _guard = RunLock::acquire(&path).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.trim(), std::process::id().to_string());
    }
}
