//! Drive enumeration and free-space accounting via the Win32 API.

use std::ffi::OsString;
use std::os::windows::ffi::{OsStrExt, OsStringExt};
use std::path::{Path, PathBuf};
use volstat_core::{
    FilesystemStatProvider, FsStats, RawVolumeDescriptor, VolstatError, VolumeProvider,
    VolumeState,
};
use windows::core::PCWSTR;
use windows::Win32::Storage::FileSystem::{
    GetDiskFreeSpaceExW, GetDriveTypeW, GetLogicalDriveStringsW, GetVolumeInformationW,
};

// Drive type constants from the Windows API.
const DRIVE_REMOVABLE_VAL: u32 = 2;
const DRIVE_FIXED_VAL: u32 = 3;
const DRIVE_REMOTE_VAL: u32 = 4;
const DRIVE_CDROM_VAL: u32 = 5;

pub struct WindowsVolumeProvider;

pub struct WindowsStatProvider;

fn to_wide(s: &std::ffi::OsStr) -> Vec<u16> {
    s.encode_wide().chain(std::iter::once(0)).collect()
}

impl VolumeProvider for WindowsVolumeProvider {
    fn list_volumes(&self) -> Result<Vec<RawVolumeDescriptor>, VolstatError> {
        // GetLogicalDriveStringsW fills a null-separated list of roots.
        let mut buffer = [0u16; 512];
        let len = unsafe { GetLogicalDriveStringsW(Some(&mut buffer)) };
        if len == 0 {
            return Err(VolstatError::ProviderUnavailable(
                "GetLogicalDriveStringsW returned 0".to_string(),
            ));
        }

        let system_drive = std::env::var("SystemDrive").unwrap_or_else(|_| "C:".to_string());
        let full = OsString::from_wide(&buffer[..len as usize]);
        let full_str = full.to_string_lossy();
        let mut descriptors = Vec::new();

        for root in full_str.split('\0').filter(|s| !s.is_empty()) {
            let root_wide = to_wide(std::ffi::OsStr::new(root));
            let root_pcwstr = PCWSTR(root_wide.as_ptr());

            let raw_type = unsafe { GetDriveTypeW(root_pcwstr) };
            // Network drives are not local volumes; skip them.
            if raw_type == DRIVE_REMOTE_VAL {
                continue;
            }
            let removable = raw_type == DRIVE_REMOVABLE_VAL;

            let mut label_buf = [0u16; 256];
            let has_volume_info = unsafe {
                GetVolumeInformationW(
                    root_pcwstr,
                    Some(&mut label_buf),
                    None,
                    None,
                    None,
                    None,
                )
                .is_ok()
            };

            let label = if has_volume_info {
                String::from_utf16_lossy(
                    &label_buf[..label_buf.iter().position(|&c| c == 0).unwrap_or(0)],
                )
            } else {
                String::new()
            };
            let description = if !label.is_empty() {
                label
            } else {
                default_label(raw_type).to_string()
            };

            // A drive letter with no readable volume (empty card reader,
            // CD tray) reports no volume information.
            let state = if has_volume_info {
                VolumeState::Mounted
            } else if removable || raw_type == DRIVE_CDROM_VAL {
                VolumeState::Removed
            } else {
                VolumeState::Unknown
            };

            let is_primary = root
                .trim_end_matches('\\')
                .eq_ignore_ascii_case(&system_drive);

            log::debug!(
                "found drive {} (type={}, state={:?})",
                root,
                raw_type,
                state
            );

            descriptors.push(RawVolumeDescriptor {
                path: Some(PathBuf::from(root)),
                description: Some(description),
                state: Some(state),
                removable: Some(removable),
                primary: Some(is_primary),
                allows_mass_storage: Some(removable),
            });
        }

        Ok(descriptors)
    }
}

fn default_label(raw_type: u32) -> &'static str {
    match raw_type {
        DRIVE_FIXED_VAL => "Local Disk",
        DRIVE_REMOVABLE_VAL => "Removable Disk",
        DRIVE_CDROM_VAL => "CD-ROM Drive",
        _ => "Disk",
    }
}

impl FilesystemStatProvider for WindowsStatProvider {
    fn stat(&self, path: &Path) -> Result<FsStats, VolstatError> {
        if !path.exists() {
            return Err(VolstatError::PathNotFound(path.display().to_string()));
        }
        let path_wide = to_wide(path.as_os_str());
        let mut free_caller: u64 = 0;
        let mut total: u64 = 0;
        let mut free_total: u64 = 0;
        unsafe {
            GetDiskFreeSpaceExW(
                PCWSTR(path_wide.as_ptr()),
                Some(&mut free_caller as *mut u64),
                Some(&mut total as *mut u64),
                Some(&mut free_total as *mut u64),
            )
        }
        .map_err(|e| VolstatError::Other(format!("GetDiskFreeSpaceExW failed: {}", e)))?;

        Ok(FsStats {
            total_bytes: total,
            free_bytes: free_caller,
        })
    }

    fn probe_state(&self, path: &Path) -> Option<VolumeState> {
        // A drive root that exists and stats is mounted; anything else is
        // left for the inventory to record as Unknown.
        if path.exists() && self.stat(path).is_ok() {
            Some(VolumeState::Mounted)
        } else {
            None
        }
    }
}
