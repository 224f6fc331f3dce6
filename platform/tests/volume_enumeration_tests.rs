/// Tests for host volume enumeration.
/// Assertions only rely on invariants that hold on any machine or CI
/// container, not on a particular drive layout.

#[cfg(test)]
mod volume_enumeration_tests {
    use volstat_core::{FilesystemStatProvider, VolumeProvider, VolumeState};
    use volstat_platform::{system_inventory, PlatformStatProvider, PlatformVolumeProvider};

    #[test]
    fn enumeration_does_not_error() {
        let provider = PlatformVolumeProvider;
        let result = provider.list_volumes();
        assert!(result.is_ok(), "volume enumeration failed: {:?}", result);

        for desc in result.unwrap() {
            println!("found volume: {:?}", desc.path);
        }
    }

    #[test]
    fn volumes_honor_the_mounted_sizes_policy() {
        let inventory = system_inventory();
        for volume in inventory.list_volumes() {
            if volume.state != VolumeState::Mounted {
                assert_eq!(volume.total_bytes, 0, "unmounted volume {} has a size", volume.path);
                assert_eq!(volume.free_bytes, 0, "unmounted volume {} has free space", volume.path);
            }
            assert_eq!(
                volume.is_usb,
                volume.description.to_lowercase().contains("usb"),
                "usb flag disagrees with description for {}",
                volume.path
            );
        }
    }

    #[test]
    fn root_volume_is_primary_when_reported() {
        let inventory = system_inventory();
        for volume in inventory.list_volumes() {
            if volume.path == "/" {
                assert!(volume.primary, "root volume not flagged primary");
                assert!(!volume.removable, "root volume flagged removable");
            }
        }
    }

    #[test]
    fn volume_paths_all_have_positive_total_space() {
        let inventory = system_inventory();
        for path in inventory.list_volume_paths() {
            assert!(
                inventory.total_space(&path) > 0,
                "path {} listed without positive total space",
                path
            );
        }
    }

    #[test]
    fn stat_on_real_directory_reports_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let stats = PlatformStatProvider.stat(dir.path()).unwrap();
        assert!(stats.total_bytes > 0);
        assert!(stats.free_bytes <= stats.total_bytes);

        let inventory = system_inventory();
        assert!(inventory.total_space(dir.path()) > 0);
    }

    #[test]
    fn stat_on_missing_path_reads_as_zero() {
        let inventory = system_inventory();
        assert_eq!(inventory.free_space("/no/such/path/anywhere"), 0);
        assert_eq!(inventory.total_space("/no/such/path/anywhere"), 0);
        assert!(!inventory.is_mounted("/no/such/path/anywhere"));
    }

    #[cfg(unix)]
    #[test]
    fn probe_reports_root_as_mounted() {
        use std::path::Path;
        let state = PlatformStatProvider.probe_state(Path::new("/"));
        assert_eq!(state, Some(VolumeState::Mounted));
    }

    #[cfg(unix)]
    #[test]
    fn probe_stays_silent_for_plain_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(PlatformStatProvider.probe_state(dir.path()), None);
    }
}
