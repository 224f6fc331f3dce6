mod volume;

pub use volume::LinuxVolumeProvider;
