use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A metric toggle known to the sampler.
///
/// The variant order is the toggle table order; evaluation order inside a
/// snapshot is decided by the snapshotter, not by this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    Uptime,
    CpuInfo,
    CpuFrequency,
    CpuCores,
    CpuThreads,
    DiskIo,
    DiskUsage,
    TotalProcesses,
    ActiveConnections,
    CpuUsage,
    RamUsage,
    NetworkIo,
    DataDownloaded,
    DataUploaded,
    CpuTemperature,
    BatteryStatus,
    SwapMemory,
    TopProcesses,
}

impl Metric {
    pub const ALL: [Metric; 18] = [
        Metric::Uptime,
        Metric::CpuInfo,
        Metric::CpuFrequency,
        Metric::CpuCores,
        Metric::CpuThreads,
        Metric::DiskIo,
        Metric::DiskUsage,
        Metric::TotalProcesses,
        Metric::ActiveConnections,
        Metric::CpuUsage,
        Metric::RamUsage,
        Metric::NetworkIo,
        Metric::DataDownloaded,
        Metric::DataUploaded,
        Metric::CpuTemperature,
        Metric::BatteryStatus,
        Metric::SwapMemory,
        Metric::TopProcesses,
    ];

    /// Toggle name as it appears in configuration files.
    pub fn toggle_name(self) -> &'static str {
        match self {
            Self::Uptime => "show_uptime",
            Self::CpuInfo => "show_cpu_info",
            Self::CpuFrequency => "show_cpu_frequency",
            Self::CpuCores => "show_cpu_cores",
            Self::CpuThreads => "show_cpu_threads",
            Self::DiskIo => "show_disk_io",
            Self::DiskUsage => "show_disk_usage",
            Self::TotalProcesses => "show_total_processes",
            Self::ActiveConnections => "show_active_connections",
            Self::CpuUsage => "show_cpu_usage",
            Self::RamUsage => "show_ram_usage",
            Self::NetworkIo => "show_network_io",
            Self::DataDownloaded => "show_data_downloaded",
            Self::DataUploaded => "show_data_uploaded",
            Self::CpuTemperature => "show_cpu_temperature",
            Self::BatteryStatus => "show_battery_status",
            Self::SwapMemory => "show_swap_memory",
            Self::TopProcesses => "show_top_processes",
        }
    }

    pub fn from_toggle_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.toggle_name() == name)
    }

    /// Whether the metric is sampled when no configuration says otherwise.
    pub fn enabled_by_default(self) -> bool {
        matches!(
            self,
            Self::Uptime
                | Self::DiskIo
                | Self::DiskUsage
                | Self::TotalProcesses
                | Self::ActiveConnections
                | Self::CpuUsage
                | Self::RamUsage
                | Self::DataDownloaded
                | Self::DataUploaded
        )
    }
}

/// Immutable set of metric toggles.
///
/// Serialized as a map from toggle name to bool. Unknown names are ignored
/// on load and missing names keep their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, bool>", into = "BTreeMap<String, bool>")]
pub struct MetricSelector {
    enabled: BTreeMap<Metric, bool>,
}

impl Default for MetricSelector {
    fn default() -> Self {
        Self {
            enabled: Metric::ALL
                .into_iter()
                .map(|m| (m, m.enabled_by_default()))
                .collect(),
        }
    }
}

impl MetricSelector {
    /// Selector with every toggle off.
    pub fn none() -> Self {
        Self {
            enabled: Metric::ALL.into_iter().map(|m| (m, false)).collect(),
        }
    }

    /// Look up a toggle by name. Unknown names read as disabled.
    pub fn is_enabled(&self, name: &str) -> bool {
        Metric::from_toggle_name(name).is_some_and(|m| self.is_metric_enabled(m))
    }

    pub fn is_metric_enabled(&self, metric: Metric) -> bool {
        self.enabled.get(&metric).copied().unwrap_or(false)
    }

    /// Copy of this selector with one toggle changed.
    pub fn with(mut self, metric: Metric, enabled: bool) -> Self {
        self.enabled.insert(metric, enabled);
        self
    }

    /// Copy of this selector with every known toggle switched on.
    pub fn with_all_enabled(self) -> Self {
        Self {
            enabled: Metric::ALL.into_iter().map(|m| (m, true)).collect(),
        }
    }

    pub fn enabled_count(&self) -> usize {
        self.enabled.values().filter(|on| **on).count()
    }
}

impl From<BTreeMap<String, bool>> for MetricSelector {
    fn from(toggles: BTreeMap<String, bool>) -> Self {
        toggles
            .into_iter()
            .filter_map(|(name, on)| Metric::from_toggle_name(&name).map(|m| (m, on)))
            .fold(Self::default(), |selector, (metric, on)| selector.with(metric, on))
    }
}

impl From<MetricSelector> for BTreeMap<String, bool> {
    fn from(selector: MetricSelector) -> Self {
        selector
            .enabled
            .into_iter()
            .map(|(m, on)| (m.toggle_name().to_string(), on))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let selector = MetricSelector::default();
        assert!(selector.is_enabled("show_uptime"));
        assert!(selector.is_enabled("show_cpu_usage"));
        assert!(selector.is_enabled("show_disk_io"));
        assert!(!selector.is_enabled("show_top_processes"));
        assert!(!selector.is_enabled("show_battery_status"));
        assert_eq!(selector.enabled_count(), 9);
    }

    #[test]
    fn test_unknown_name_is_disabled() {
        let selector = MetricSelector::default().with_all_enabled();
        assert!(!selector.is_enabled("show_gpu_usage"));
    }

    #[test]
    fn test_enable_all_is_a_transform() {
        let defaults = MetricSelector::default();
        let all = defaults.clone().with_all_enabled();
        assert_eq!(all.enabled_count(), Metric::ALL.len());
        assert!(!defaults.is_enabled("show_top_processes"));
    }

    #[test]
    fn test_toggle_names_round_trip() {
        for metric in Metric::ALL {
            assert_eq!(Metric::from_toggle_name(metric.toggle_name()), Some(metric));
        }
    }

    #[test]
    fn test_deserialize_partial_map() {
        let json = r#"{"show_top_processes": true, "show_uptime": false, "show_bogus": true}"#;
        let selector: MetricSelector = serde_json::from_str(json).unwrap();
        assert!(selector.is_enabled("show_top_processes"));
        assert!(!selector.is_enabled("show_uptime"));
        // untouched entries keep their defaults
        assert!(selector.is_enabled("show_ram_usage"));
        assert!(!selector.is_enabled("show_bogus"));
    }
}
