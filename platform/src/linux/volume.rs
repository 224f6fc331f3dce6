use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;
use volstat_core::{RawVolumeDescriptor, VolstatError, VolumeProvider, VolumeState};

/// Enumerates block-backed mounts from /proc/mounts, with removability
/// and transport information from /sys/block.
pub struct LinuxVolumeProvider;

/// One parsed /proc/mounts line we care about.
struct MountEntry {
    source: String,
    mount_point: String,
    read_only: bool,
}

impl VolumeProvider for LinuxVolumeProvider {
    fn list_volumes(&self) -> Result<Vec<RawVolumeDescriptor>, VolstatError> {
        let mounts = fs::read_to_string("/proc/mounts")?;
        let mut seen = HashSet::new();
        let mut descriptors = Vec::new();

        for entry in parse_mounts(&mounts) {
            // Overmounts repeat the mount point; keep the first.
            if !seen.insert(entry.mount_point.clone()) {
                continue;
            }

            let device_name = entry.source.trim_start_matches("/dev/");
            let disk = parent_disk(device_name);
            let removable = disk_flag_set(disk, "removable");
            let usb = is_usb_backed(disk);

            let model = disk_model(disk).unwrap_or_else(|| device_name.to_uppercase());
            let description = if usb {
                format!("USB {} ({})", model, device_name)
            } else {
                format!("{} ({})", model, device_name)
            };

            log::debug!(
                "found mount {} on {} (removable={}, usb={})",
                entry.source,
                entry.mount_point,
                removable,
                usb
            );

            descriptors.push(RawVolumeDescriptor {
                primary: Some(entry.mount_point == "/"),
                path: Some(PathBuf::from(&entry.mount_point)),
                description: Some(description),
                state: Some(if entry.read_only {
                    VolumeState::MountedReadOnly
                } else {
                    VolumeState::Mounted
                }),
                removable: Some(removable),
                allows_mass_storage: Some(removable && usb),
            });
        }

        Ok(descriptors)
    }
}

/// Keep only mounts backed by a real block device. Pseudo-filesystems
/// (proc, tmpfs, cgroup, ...) all have non-/dev sources.
fn parse_mounts(content: &str) -> Vec<MountEntry> {
    content
        .lines()
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let source = parts.next()?;
            let mount_point = parts.next()?;
            let _fstype = parts.next()?;
            let options = parts.next().unwrap_or("");

            if !source.starts_with("/dev/") {
                return None;
            }
            // Device-mapper nodes are fine; loop and ram devices are not
            // volumes in any useful sense.
            let name = source.trim_start_matches("/dev/");
            if name.starts_with("loop") || name.starts_with("ram") {
                return None;
            }

            Some(MountEntry {
                source: source.to_string(),
                mount_point: unescape_mount_path(mount_point),
                read_only: options.split(',').any(|opt| opt == "ro"),
            })
        })
        .collect()
}

/// /proc/mounts escapes space, tab, newline and backslash as \NNN octal.
fn unescape_mount_path(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let code: String = chars.by_ref().take(3).collect();
        match u8::from_str_radix(&code, 8) {
            Ok(byte) => out.push(byte as char),
            Err(_) => {
                out.push(c);
                out.push_str(&code);
            }
        }
    }
    out
}

/// Strip the partition suffix to get the parent disk name:
/// sda1 -> sda, nvme0n1p2 -> nvme0n1, mmcblk0p1 -> mmcblk0.
fn parent_disk(name: &str) -> &str {
    if name.starts_with("nvme") || name.starts_with("mmcblk") {
        if let Some(idx) = name.rfind('p') {
            let suffix = &name[idx + 1..];
            if !suffix.is_empty() && suffix.chars().all(|c| c.is_ascii_digit()) {
                return &name[..idx];
            }
        }
        name
    } else {
        name.trim_end_matches(|c: char| c.is_ascii_digit())
    }
}

fn disk_flag_set(disk: &str, flag: &str) -> bool {
    fs::read_to_string(format!("/sys/block/{}/{}", disk, flag))
        .map(|content| content.trim() == "1")
        .unwrap_or(false)
}

/// The resolved sysfs path of a USB-attached disk runs through a usb
/// host controller directory.
fn is_usb_backed(disk: &str) -> bool {
    fs::canonicalize(format!("/sys/block/{}", disk))
        .map(|resolved| resolved.to_string_lossy().contains("/usb"))
        .unwrap_or(false)
}

fn disk_model(disk: &str) -> Option<String> {
    for attr in ["model", "vendor"] {
        if let Ok(value) = fs::read_to_string(format!("/sys/block/{}/device/{}", disk, attr)) {
            let value = value.trim();
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_disk_strips_partition_suffixes() {
        assert_eq!(parent_disk("sda1"), "sda");
        assert_eq!(parent_disk("sdb"), "sdb");
        assert_eq!(parent_disk("nvme0n1p2"), "nvme0n1");
        assert_eq!(parent_disk("nvme0n1"), "nvme0n1");
        assert_eq!(parent_disk("mmcblk0p1"), "mmcblk0");
        assert_eq!(parent_disk("mmcblk0"), "mmcblk0");
    }

    #[test]
    fn unescape_decodes_octal_sequences() {
        assert_eq!(unescape_mount_path("/mnt/usb\\040stick"), "/mnt/usb stick");
        assert_eq!(unescape_mount_path("/plain/path"), "/plain/path");
        assert_eq!(unescape_mount_path("/odd\\zzz"), "/odd\\zzz");
    }

    #[test]
    fn parse_mounts_keeps_only_block_devices() {
        let content = "\
proc /proc proc rw,nosuid 0 0
/dev/sda1 / ext4 rw,relatime 0 0
tmpfs /run tmpfs rw,nosuid 0 0
/dev/sdb1 /mnt/data ext4 ro,relatime 0 0
/dev/loop3 /snap/foo squashfs ro 0 0
overlay /var/lib/docker overlay rw 0 0
";
        let entries = parse_mounts(content);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].mount_point, "/");
        assert!(!entries[0].read_only);
        assert_eq!(entries[1].source, "/dev/sdb1");
        assert!(entries[1].read_only);
    }

    #[test]
    fn ro_detection_requires_exact_option() {
        let content = "/dev/sda1 / ext4 rw,errors=remount-ro 0 0\n";
        let entries = parse_mounts(content);
        assert!(!entries[0].read_only);
    }
}
