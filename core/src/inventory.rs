use crate::provider::{FilesystemStatProvider, VolumeProvider};
use crate::{RawVolumeDescriptor, VolstatError, Volume, VolumeState};
use std::path::Path;

/// Stateless query surface over the two host collaborators.
///
/// Every operation recomputes from scratch; nothing is cached between
/// calls, so the struct is safe to share across threads. Enumeration can
/// cost several syscalls per volume, so callers on latency-sensitive
/// paths should cache the returned values themselves.
pub struct StorageInventory<V, S> {
    volumes: V,
    stats: S,
}

impl<V, S> StorageInventory<V, S>
where
    V: VolumeProvider,
    S: FilesystemStatProvider,
{
    pub fn new(volumes: V, stats: S) -> Self {
        Self { volumes, stats }
    }

    /// Enumerate all volumes, surfacing provider failure to the caller.
    ///
    /// Per-volume problems never fail the call: a volume whose stat or
    /// state lookup fails is emitted with zeroed/`Unknown` fields rather
    /// than dropped. Order matches the provider; no sorting.
    pub fn try_list_volumes(&self) -> Result<Vec<Volume>, VolstatError> {
        let descriptors = self.volumes.list_volumes()?;
        Ok(descriptors
            .into_iter()
            .map(|desc| self.build_volume(desc))
            .collect())
    }

    /// Fail-silent form of [`try_list_volumes`](Self::try_list_volumes):
    /// total provider failure yields an empty vec, never an error.
    pub fn list_volumes(&self) -> Vec<Volume> {
        match self.try_list_volumes() {
            Ok(volumes) => volumes,
            Err(e) => {
                tracing::warn!("volume enumeration failed, returning empty list: {e}");
                Vec::new()
            }
        }
    }

    /// Bytes available at `path`, from block-level accounting.
    /// Nonexistent path or stat failure reads as 0, not an error.
    pub fn free_space(&self, path: impl AsRef<Path>) -> u64 {
        match self.stats.stat(path.as_ref()) {
            Ok(stats) => stats.free_bytes,
            Err(e) => {
                tracing::debug!(path = %path.as_ref().display(), "free_space stat failed: {e}");
                0
            }
        }
    }

    /// Total capacity at `path`; same contract as [`free_space`](Self::free_space).
    pub fn total_space(&self, path: impl AsRef<Path>) -> u64 {
        match self.stats.stat(path.as_ref()) {
            Ok(stats) => stats.total_bytes,
            Err(e) => {
                tracing::debug!(path = %path.as_ref().display(), "total_space stat failed: {e}");
                0
            }
        }
    }

    /// Provider paths with strictly positive total space, in provider
    /// order. Filters out volumes that are not currently accessible.
    pub fn list_volume_paths(&self) -> Vec<String> {
        let descriptors = match self.volumes.list_volumes() {
            Ok(descriptors) => descriptors,
            Err(e) => {
                tracing::warn!("volume enumeration failed, returning no paths: {e}");
                return Vec::new();
            }
        };
        descriptors
            .into_iter()
            .filter_map(|desc| desc.path)
            .map(|path| path.to_string_lossy().into_owned())
            .filter(|path| self.total_space(path) > 0)
            .collect()
    }

    /// True iff a volume with exactly this path currently reports
    /// `Mounted`. Any failure reads as false.
    pub fn is_mounted(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        self.list_volumes()
            .iter()
            .any(|v| Path::new(&v.path) == path && v.state == VolumeState::Mounted)
    }

    /// The first volume flagged primary, if any.
    pub fn primary_volume(&self) -> Option<Volume> {
        self.list_volumes().into_iter().find(|v| v.primary)
    }

    /// All removable volumes, in provider order.
    pub fn removable_volumes(&self) -> Vec<Volume> {
        self.list_volumes()
            .into_iter()
            .filter(|v| v.removable)
            .collect()
    }

    fn build_volume(&self, desc: RawVolumeDescriptor) -> Volume {
        let path = desc
            .path
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();
        let description = desc.description.unwrap_or_default();

        let state = match desc.state {
            Some(state) => state,
            None if !path.is_empty() => self
                .stats
                .probe_state(Path::new(&path))
                .unwrap_or(VolumeState::Unknown),
            None => VolumeState::Unknown,
        };

        // Sizes are attempted only for mounted volumes; everything else
        // stays at exactly 0 by policy, not as a failure artifact.
        let (total_bytes, free_bytes) = if state == VolumeState::Mounted {
            match self.stats.stat(Path::new(&path)) {
                Ok(stats) => (stats.total_bytes, stats.free_bytes),
                Err(e) => {
                    tracing::debug!(path = %path, "stat failed for mounted volume: {e}");
                    (0, 0)
                }
            }
        } else {
            (0, 0)
        };

        Volume {
            is_usb: description.to_lowercase().contains("usb"),
            path,
            description,
            state,
            removable: desc.removable.unwrap_or(false),
            primary: desc.primary.unwrap_or(false),
            allows_mass_storage: desc.allows_mass_storage.unwrap_or(false),
            total_bytes,
            free_bytes,
        }
    }
}
