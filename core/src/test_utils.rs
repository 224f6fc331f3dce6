/// Mock collaborators for testing - never touch real hardware
use crate::provider::{FilesystemStatProvider, FsStats, VolumeProvider};
use crate::{RawVolumeDescriptor, VolstatError, VolumeState};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Volume provider serving canned descriptors. Clones share the call
/// counter, so a test can keep a handle while the inventory owns one.
#[derive(Clone)]
pub struct MockVolumeProvider {
    descriptors: Vec<RawVolumeDescriptor>,
    fail: bool,
    list_call_count: Arc<Mutex<usize>>,
}

impl MockVolumeProvider {
    /// Two typical volumes: a mounted internal primary and a removable
    /// USB stick.
    pub fn new() -> Self {
        Self::with_descriptors(vec![
            mounted_descriptor("/storage/emulated/0", "Internal Storage", true, false),
            mounted_descriptor("/storage/usb1", "USB Drive", false, true),
        ])
    }

    pub fn with_descriptors(descriptors: Vec<RawVolumeDescriptor>) -> Self {
        Self {
            descriptors,
            fail: false,
            list_call_count: Arc::new(Mutex::new(0)),
        }
    }

    /// Provider that reports total failure on every call.
    pub fn unavailable() -> Self {
        Self {
            descriptors: Vec::new(),
            fail: true,
            list_call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.list_call_count.lock().unwrap()
    }
}

impl Default for MockVolumeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl VolumeProvider for MockVolumeProvider {
    fn list_volumes(&self) -> Result<Vec<RawVolumeDescriptor>, VolstatError> {
        *self.list_call_count.lock().unwrap() += 1;
        if self.fail {
            return Err(VolstatError::ProviderUnavailable(
                "mock provider configured to fail".to_string(),
            ));
        }
        Ok(self.descriptors.clone())
    }
}

/// Stat provider answering from per-path canned values. Paths without a
/// registered entry fail with `PathNotFound`, like a real stat on a
/// missing mount point.
#[derive(Default)]
pub struct MockStatProvider {
    stats: HashMap<PathBuf, FsStats>,
    states: HashMap<PathBuf, VolumeState>,
}

impl MockStatProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stat(mut self, path: &str, total_bytes: u64, free_bytes: u64) -> Self {
        self.stats.insert(
            PathBuf::from(path),
            FsStats {
                total_bytes,
                free_bytes,
            },
        );
        self
    }

    pub fn with_state(mut self, path: &str, state: VolumeState) -> Self {
        self.states.insert(PathBuf::from(path), state);
        self
    }
}

impl FilesystemStatProvider for MockStatProvider {
    fn stat(&self, path: &Path) -> Result<FsStats, VolstatError> {
        self.stats
            .get(path)
            .copied()
            .ok_or_else(|| VolstatError::PathNotFound(path.display().to_string()))
    }

    fn probe_state(&self, path: &Path) -> Option<VolumeState> {
        self.states.get(path).copied()
    }
}

/// Descriptor for a mounted volume with all host fields present.
pub fn mounted_descriptor(
    path: &str,
    description: &str,
    primary: bool,
    removable: bool,
) -> RawVolumeDescriptor {
    RawVolumeDescriptor {
        path: Some(PathBuf::from(path)),
        description: Some(description.to_string()),
        state: Some(VolumeState::Mounted),
        removable: Some(removable),
        primary: Some(primary),
        allows_mass_storage: Some(removable),
    }
}
