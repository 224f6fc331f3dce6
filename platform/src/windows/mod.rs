mod volume;

pub use volume::{WindowsStatProvider, WindowsVolumeProvider};
