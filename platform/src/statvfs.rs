//! Unix stat provider backed by statvfs(2).

use std::path::Path;
use volstat_core::{FilesystemStatProvider, FsStats, VolstatError, VolumeState};

pub struct StatvfsStatProvider;

impl FilesystemStatProvider for StatvfsStatProvider {
    fn stat(&self, path: &Path) -> Result<FsStats, VolstatError> {
        if !path.exists() {
            return Err(VolstatError::PathNotFound(path.display().to_string()));
        }
        let vfs = nix::sys::statvfs::statvfs(path)
            .map_err(|errno| VolstatError::Io(errno.into()))?;
        // f_frsize is the unit of the block counts; f_bavail is what an
        // unprivileged caller can actually allocate.
        Ok(FsStats {
            total_bytes: vfs.blocks() as u64 * vfs.fragment_size() as u64,
            free_bytes: vfs.blocks_available() as u64 * vfs.fragment_size() as u64,
        })
    }

    fn probe_state(&self, path: &Path) -> Option<VolumeState> {
        // Only answer for paths that are demonstrably mount points; the
        // inventory records Unknown for everything else.
        if is_mount_point(path) {
            Some(VolumeState::Mounted)
        } else {
            None
        }
    }
}

/// A path is a mount point when it sits on a different device than its
/// parent directory. The filesystem root always qualifies.
fn is_mount_point(path: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    let Ok(meta) = std::fs::metadata(path) else {
        return false;
    };
    let Some(parent) = path.parent() else {
        return true;
    };
    match std::fs::metadata(parent) {
        Ok(parent_meta) => meta.dev() != parent_meta.dev(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_is_a_mount_point() {
        assert!(is_mount_point(Path::new("/")));
    }

    #[test]
    fn missing_path_is_not_a_mount_point() {
        assert!(!is_mount_point(Path::new("/no/such/path/here")));
    }

    #[test]
    fn plain_directory_is_not_a_mount_point() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_mount_point(dir.path()));
    }
}
