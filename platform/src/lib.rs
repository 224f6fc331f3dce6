use volstat_core::StorageInventory;

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(unix)]
pub mod statvfs;

#[cfg(target_os = "linux")]
pub use linux::LinuxVolumeProvider as PlatformVolumeProvider;

#[cfg(target_os = "windows")]
pub use windows::WindowsVolumeProvider as PlatformVolumeProvider;

#[cfg(target_os = "macos")]
pub use macos::MacVolumeProvider as PlatformVolumeProvider;

#[cfg(unix)]
pub use statvfs::StatvfsStatProvider as PlatformStatProvider;

#[cfg(target_os = "windows")]
pub use windows::WindowsStatProvider as PlatformStatProvider;

/// Inventory wired to this host's volume and stat providers.
pub fn system_inventory() -> StorageInventory<PlatformVolumeProvider, PlatformStatProvider> {
    StorageInventory::new(PlatformVolumeProvider, PlatformStatProvider)
}
