//! Capability interface over the operating system's metric sources.
//!
//! Every reading is independent: a provider answers `Reading::Unsupported`
//! for anything it cannot supply right now and the snapshot carries on.
//! Only [`MetricsProvider::refresh`] may fail, and such a failure means the
//! provider as a whole is unusable.

use crate::error::Result;
use std::time::Duration;

/// Tagged result of a single provider query
#[derive(Debug, Clone, PartialEq)]
pub enum Reading<T> {
    Available(T),
    Unsupported,
}

impl<T> Reading<T> {
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Reading<U> {
        match self {
            Self::Available(value) => Reading::Available(f(value)),
            Self::Unsupported => Reading::Unsupported,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    pub fn available(self) -> Option<T> {
        match self {
            Self::Available(value) => Some(value),
            Self::Unsupported => None,
        }
    }
}

impl<T> From<Option<T>> for Reading<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Self::Available(value),
            None => Self::Unsupported,
        }
    }
}

/// Cumulative interface counters since boot, summed over all interfaces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NetworkTotals {
    pub bytes_received: u64,
    pub bytes_sent: u64,
}

/// Cumulative block device counters since boot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiskIoTotals {
    pub read_bytes: u64,
    pub write_bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SwapUsage {
    pub percent: f64,
    pub used: u64,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryStatus {
    pub percent: f64,
    pub charging: bool,
}

/// CPU clock in MHz. Bounds are `None` when the platform does not expose them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuFrequency {
    pub current: f64,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Raw per-process sample used for the top-processes metric
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessSample {
    pub name: String,
    pub cpu_percent: f64,
    pub memory_percent: f64,
}

impl ProcessSample {
    pub fn new(name: impl Into<String>, cpu_percent: f64, memory_percent: f64) -> Self {
        Self {
            name: name.into(),
            cpu_percent,
            memory_percent,
        }
    }
}

/// Point-in-time metric source.
///
/// All readings default to `Unsupported`, so partial providers only
/// implement what they can measure.
pub trait MetricsProvider {
    /// Update cached counters before a snapshot. Errors are fatal for the run.
    fn refresh(&mut self) -> Result<()> {
        Ok(())
    }

    fn uptime(&mut self) -> Reading<Duration> {
        Reading::Unsupported
    }

    fn active_connections(&mut self) -> Reading<usize> {
        Reading::Unsupported
    }

    /// Usage of the root filesystem in percent
    fn disk_usage_percent(&mut self) -> Reading<f64> {
        Reading::Unsupported
    }

    fn process_count(&mut self) -> Reading<usize> {
        Reading::Unsupported
    }

    /// Average usage over the short window measured by the last `refresh`,
    /// not over the whole interval since the previous snapshot
    fn cpu_usage_percent(&mut self) -> Reading<f64> {
        Reading::Unsupported
    }

    fn ram_usage_percent(&mut self) -> Reading<f64> {
        Reading::Unsupported
    }

    fn network_totals(&mut self) -> Reading<NetworkTotals> {
        Reading::Unsupported
    }

    /// CPU package temperature in degrees Celsius
    fn cpu_temperature(&mut self) -> Reading<f64> {
        Reading::Unsupported
    }

    fn battery(&mut self) -> Reading<BatteryStatus> {
        Reading::Unsupported
    }

    fn cpu_frequency(&mut self) -> Reading<CpuFrequency> {
        Reading::Unsupported
    }

    fn physical_cores(&mut self) -> Reading<usize> {
        Reading::Unsupported
    }

    fn logical_cores(&mut self) -> Reading<usize> {
        Reading::Unsupported
    }

    fn cpu_model(&mut self) -> Reading<String> {
        Reading::Unsupported
    }

    fn cpu_architecture(&mut self) -> Reading<String> {
        Reading::Unsupported
    }

    fn swap(&mut self) -> Reading<SwapUsage> {
        Reading::Unsupported
    }

    fn disk_io(&mut self) -> Reading<DiskIoTotals> {
        Reading::Unsupported
    }

    fn processes(&mut self) -> Reading<Vec<ProcessSample>> {
        Reading::Unsupported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Empty;
    impl MetricsProvider for Empty {}

    #[test]
    fn test_defaults_are_unsupported() {
        let mut provider = Empty;
        assert!(provider.refresh().is_ok());
        assert_eq!(provider.cpu_usage_percent(), Reading::Unsupported);
        assert_eq!(provider.battery(), Reading::Unsupported);
        assert!(!provider.processes().is_available());
    }

    #[test]
    fn test_reading_from_option() {
        assert_eq!(Reading::from(Some(3)), Reading::Available(3));
        assert_eq!(Reading::<u8>::from(None), Reading::Unsupported);
        assert_eq!(Reading::Available(2).map(|v| v * 2).available(), Some(4));
    }
}
