use crate::{RawVolumeDescriptor, VolstatError, VolumeState};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Filesystem usage numbers for a single mount path.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FsStats {
    pub total_bytes: u64,
    pub free_bytes: u64,
}

/// Source of raw volume descriptors. One implementation per host
/// platform; the inventory never talks to the OS directly.
pub trait VolumeProvider: Send + Sync {
    fn list_volumes(&self) -> Result<Vec<RawVolumeDescriptor>, VolstatError>;
}

/// Block-level usage accounting for a mount path.
pub trait FilesystemStatProvider: Send + Sync {
    fn stat(&self, path: &Path) -> Result<FsStats, VolstatError>;

    /// Best-effort mount-state derivation, consulted only when the volume
    /// provider reports no native state. `None` means the adapter cannot
    /// tell; the inventory then records `Unknown` rather than guessing.
    fn probe_state(&self, _path: &Path) -> Option<VolumeState> {
        None
    }
}
