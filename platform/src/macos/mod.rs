mod volume;

pub use volume::MacVolumeProvider;
