use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Mount state of a storage volume at query time.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum VolumeState {
    Mounted,
    MountedReadOnly,
    Unmounted,
    Checking,
    Ejecting,
    Removed,
    BadRemoval,
    Shared,
    Unmountable,
    NoFs,
    #[default]
    Unknown,
}

impl VolumeState {
    pub fn as_str(&self) -> &'static str {
        match self {
            VolumeState::Mounted => "mounted",
            VolumeState::MountedReadOnly => "mounted_ro",
            VolumeState::Unmounted => "unmounted",
            VolumeState::Checking => "checking",
            VolumeState::Ejecting => "ejecting",
            VolumeState::Removed => "removed",
            VolumeState::BadRemoval => "bad_removal",
            VolumeState::Shared => "shared",
            VolumeState::Unmountable => "unmountable",
            VolumeState::NoFs => "nofs",
            VolumeState::Unknown => "unknown",
        }
    }
}

impl FromStr for VolumeState {
    type Err = std::convert::Infallible;

    /// Unrecognized state names map to `Unknown` rather than failing, so
    /// host adapters can pass platform state strings through unfiltered.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "mounted" => VolumeState::Mounted,
            "mounted_ro" => VolumeState::MountedReadOnly,
            "unmounted" => VolumeState::Unmounted,
            "checking" => VolumeState::Checking,
            "ejecting" => VolumeState::Ejecting,
            "removed" => VolumeState::Removed,
            "bad_removal" => VolumeState::BadRemoval,
            "shared" => VolumeState::Shared,
            "unmountable" => VolumeState::Unmountable,
            "nofs" => VolumeState::NoFs,
            _ => VolumeState::Unknown,
        })
    }
}

/// Raw volume descriptor as reported by a host adapter. Every field the
/// host may fail to supply is optional; normalization happens in the
/// inventory, not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawVolumeDescriptor {
    pub path: Option<PathBuf>,
    pub description: Option<String>,
    pub state: Option<VolumeState>,
    pub removable: Option<bool>,
    pub primary: Option<bool>,
    pub allows_mass_storage: Option<bool>,
}

/// A fully-resolved storage volume. Built fresh on every inventory call
/// and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Volume {
    /// Mount point; empty string when the host did not report one.
    pub path: String,
    /// Human-readable label from the host.
    pub description: String,
    pub state: VolumeState,
    /// Can be physically removed.
    pub removable: bool,
    /// The device's primary/internal volume.
    pub primary: bool,
    /// Volume supports mass-storage mode.
    pub allows_mass_storage: bool,
    /// Derived: the description mentions "usb" (case-insensitive).
    pub is_usb: bool,
    /// 0 unless `state == Mounted` and the stat succeeded.
    pub total_bytes: u64,
    /// 0 unless `state == Mounted` and the stat succeeded.
    pub free_bytes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_string_round_trip() {
        for state in [
            VolumeState::Mounted,
            VolumeState::MountedReadOnly,
            VolumeState::Unmounted,
            VolumeState::Checking,
            VolumeState::Ejecting,
            VolumeState::Removed,
            VolumeState::BadRemoval,
            VolumeState::Shared,
            VolumeState::Unmountable,
            VolumeState::NoFs,
            VolumeState::Unknown,
        ] {
            let parsed: VolumeState = state.as_str().parse().unwrap();
            assert_eq!(parsed, state);
        }
    }

    #[test]
    fn unrecognized_state_parses_to_unknown() {
        let parsed: VolumeState = "not_a_state".parse().unwrap();
        assert_eq!(parsed, VolumeState::Unknown);
        let parsed: VolumeState = "".parse().unwrap();
        assert_eq!(parsed, VolumeState::Unknown);
    }

    #[test]
    fn default_descriptor_is_all_empty() {
        let desc = RawVolumeDescriptor::default();
        assert!(desc.path.is_none());
        assert!(desc.state.is_none());
        assert!(desc.removable.is_none());
    }

    #[test]
    fn volume_serializes_with_snake_case_state() {
        let volume = Volume {
            path: "/storage/sdcard1".to_string(),
            description: "SD Card".to_string(),
            state: VolumeState::BadRemoval,
            removable: true,
            primary: false,
            allows_mass_storage: false,
            is_usb: false,
            total_bytes: 0,
            free_bytes: 0,
        };
        let json = serde_json::to_string(&volume).unwrap();
        assert!(json.contains("\"bad_removal\""));
    }
}
