pub mod error;
pub mod inventory;
pub mod provider;
pub mod test_utils;
pub mod volume;

pub use error::VolstatError;
pub use inventory::StorageInventory;
pub use provider::{FilesystemStatProvider, FsStats, VolumeProvider};
pub use volume::{RawVolumeDescriptor, Volume, VolumeState};
