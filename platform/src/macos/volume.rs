use std::fs;
use std::path::{Path, PathBuf};
use volstat_core::{RawVolumeDescriptor, VolstatError, VolumeProvider, VolumeState};

/// Enumerates the root volume plus everything mounted under /Volumes.
///
/// Removability is left unreported here; answering it properly needs
/// diskutil/IOKit and the inventory normalizes the missing flag to false.
pub struct MacVolumeProvider;

impl VolumeProvider for MacVolumeProvider {
    fn list_volumes(&self) -> Result<Vec<RawVolumeDescriptor>, VolstatError> {
        let mut descriptors = vec![RawVolumeDescriptor {
            path: Some(PathBuf::from("/")),
            description: None,
            state: Some(VolumeState::Mounted),
            removable: Some(false),
            primary: Some(true),
            allows_mass_storage: Some(false),
        }];

        for entry in fs::read_dir("/Volumes")? {
            let entry = entry?;
            let path = entry.path();
            // The boot volume appears under /Volumes as a link back to /.
            if fs::canonicalize(&path).map(|p| p == Path::new("/")).unwrap_or(false) {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            log::debug!("found volume {} at {}", name, path.display());

            descriptors.push(RawVolumeDescriptor {
                path: Some(path),
                description: Some(name),
                state: Some(VolumeState::Mounted),
                removable: None,
                primary: Some(false),
                allows_mass_storage: None,
            });
        }

        Ok(descriptors)
    }
}
