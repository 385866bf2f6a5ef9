#[cfg(target_os = "linux")]
pub mod linux;
#[cfg(target_os = "macos")]
pub mod macos;
#[cfg(target_os = "windows")]
pub mod windows;

use crate::provider::{BatteryStatus, DiskIoTotals};

/// Platform-specific readings that sysinfo does not cover.
///
/// Every method answers `None` when the platform cannot supply the value.
pub trait PlatformProvider {
    /// Number of open inet sockets (TCP and UDP, v4 and v6)
    fn active_connections(&self) -> Option<usize> {
        None
    }

    /// Cumulative bytes read from and written to physical block devices
    fn disk_io(&self) -> Option<DiskIoTotals> {
        None
    }

    fn battery(&self) -> Option<BatteryStatus> {
        None
    }

    /// Hardware (min, max) CPU clock in MHz
    fn cpu_frequency_bounds(&self) -> (Option<f64>, Option<f64>) {
        (None, None)
    }

    /// Get platform name
    fn platform_name(&self) -> &'static str;
}

/// Get the appropriate platform provider for the current system
pub fn get_platform_provider() -> Box<dyn PlatformProvider> {
    #[cfg(target_os = "linux")]
    {
        Box::new(linux::LinuxProvider::new())
    }

    #[cfg(target_os = "macos")]
    {
        Box::new(macos::MacosProvider::new())
    }

    #[cfg(target_os = "windows")]
    {
        Box::new(windows::WindowsProvider::new())
    }

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        Box::new(GenericProvider)
    }
}

/// Generic provider for unsupported platforms
#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
pub struct GenericProvider;

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
impl PlatformProvider for GenericProvider {
    fn platform_name(&self) -> &'static str {
        "generic"
    }
}
