//! Turns provider readings into [`Event`] records.
//!
//! Metrics are evaluated in a fixed order so every event lists its keys the
//! same way: the eight core metrics first, then the extended ones.

use crate::{
    error::Result,
    format::{duration_to_human_readable, format_data_size, format_float},
    model::{Event, MetricValue, Metrics, TopProcess},
    provider::{MetricsProvider, ProcessSample, Reading},
    selector::{Metric, MetricSelector},
};
use rand::distr::{Alphanumeric, SampleString};

/// How many processes the `Top_Processes` metric keeps
pub const TOP_PROCESS_LIMIT: usize = 5;

const ID_SUFFIX_LEN: usize = 9;

/// 8-digit zero-padded sequence number followed by 9 random alphanumerics
pub fn generate_event_id(sequence: u64) -> String {
    let suffix = Alphanumeric.sample_string(&mut rand::rng(), ID_SUFFIX_LEN);
    format!("{:08}{}", sequence, suffix)
}

/// Highest CPU first, memory breaking ties, truncated to `limit`.
/// NaN readings count as 0.
pub fn select_top_processes(mut samples: Vec<ProcessSample>, limit: usize) -> Vec<TopProcess> {
    for sample in &mut samples {
        sample.cpu_percent = zero_if_nan(sample.cpu_percent);
        sample.memory_percent = zero_if_nan(sample.memory_percent);
    }
    samples.sort_by(|a, b| {
        b.cpu_percent
            .total_cmp(&a.cpu_percent)
            .then_with(|| b.memory_percent.total_cmp(&a.memory_percent))
    });
    samples.truncate(limit);

    samples
        .into_iter()
        .map(|p| TopProcess {
            name: p.name,
            cpu_percent: p.cpu_percent,
            memory_percent: p.memory_percent,
        })
        .collect()
}

fn zero_if_nan(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}

fn value_or_na<T, F: FnOnce(T) -> MetricValue>(reading: Reading<T>, f: F) -> MetricValue {
    match reading {
        Reading::Available(value) => f(value),
        Reading::Unsupported => MetricValue::not_available(),
    }
}

fn optional_mhz(value: Option<f64>) -> String {
    value.map(format_float).unwrap_or_else(|| crate::model::NOT_AVAILABLE.to_string())
}

/// Reads the enabled metrics from a provider into events
pub struct Snapshotter<P> {
    provider: P,
}

impl<P: MetricsProvider> Snapshotter<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Build one event. Only a provider-wide refresh failure is an error;
    /// single metrics the provider cannot supply come out as `"N/A"`.
    pub fn capture(&mut self, selector: &MetricSelector, sequence: u64) -> Result<Event> {
        self.provider.refresh()?;

        let on = |metric: Metric| selector.is_metric_enabled(metric);
        let p = &mut self.provider;
        let mut metrics = Metrics::new();

        if on(Metric::Uptime) {
            metrics.insert(
                "System_Uptime",
                value_or_na(p.uptime(), |d| duration_to_human_readable(d).into()),
            );
        }
        if on(Metric::ActiveConnections) {
            metrics.insert("Active_Connections", value_or_na(p.active_connections(), MetricValue::from));
        }
        if on(Metric::DiskUsage) {
            metrics.insert("Disk_Usage%", value_or_na(p.disk_usage_percent(), MetricValue::from));
        }
        if on(Metric::TotalProcesses) {
            metrics.insert("Total_Processes", value_or_na(p.process_count(), MetricValue::from));
        }
        if on(Metric::CpuUsage) {
            metrics.insert("CPU_Usage%", value_or_na(p.cpu_usage_percent(), MetricValue::from));
        }
        if on(Metric::RamUsage) {
            metrics.insert("RAM_Usage%", value_or_na(p.ram_usage_percent(), MetricValue::from));
        }
        if on(Metric::DataDownloaded) {
            metrics.insert(
                "Data_Downloaded",
                value_or_na(p.network_totals(), |n| format_data_size(n.bytes_received).into()),
            );
        }
        if on(Metric::DataUploaded) {
            metrics.insert(
                "Data_Uploaded",
                value_or_na(p.network_totals(), |n| format_data_size(n.bytes_sent).into()),
            );
        }

        if on(Metric::CpuTemperature) {
            metrics.insert(
                "CPU_Temperature",
                value_or_na(p.cpu_temperature(), |c| format!("{} °C", format_float(c)).into()),
            );
        }
        if on(Metric::BatteryStatus) {
            metrics.insert(
                "Battery_Status",
                value_or_na(p.battery(), |b| {
                    let state = if b.charging { "Charging" } else { "Discharging" };
                    format!("{}% {}", format_float(b.percent), state).into()
                }),
            );
        }
        if on(Metric::CpuFrequency) {
            metrics.insert(
                "CPU_Frequency",
                value_or_na(p.cpu_frequency(), |f| {
                    format!(
                        "{} MHz (Min: {}, Max: {})",
                        format_float(f.current),
                        optional_mhz(f.min),
                        optional_mhz(f.max)
                    )
                    .into()
                }),
            );
        }
        if on(Metric::CpuCores) {
            metrics.insert("CPU_Cores", value_or_na(p.physical_cores(), MetricValue::from));
        }
        if on(Metric::CpuThreads) {
            metrics.insert("CPU_Threads", value_or_na(p.logical_cores(), MetricValue::from));
        }
        if on(Metric::CpuInfo) {
            metrics.insert("CPU_Model", value_or_na(p.cpu_model(), MetricValue::from));
            metrics.insert("CPU_Architecture", value_or_na(p.cpu_architecture(), MetricValue::from));
        }
        if on(Metric::SwapMemory) {
            metrics.insert(
                "Swap_Usage",
                value_or_na(p.swap(), |s| {
                    format!(
                        "{}% (Used: {}, Total: {})",
                        format_float(s.percent),
                        format_data_size(s.used),
                        format_data_size(s.total)
                    )
                    .into()
                }),
            );
        }
        if on(Metric::DiskIo) {
            metrics.insert(
                "Disk_IO",
                value_or_na(p.disk_io(), |io| {
                    format!(
                        "Read: {}, Write: {}",
                        format_data_size(io.read_bytes),
                        format_data_size(io.write_bytes)
                    )
                    .into()
                }),
            );
        }
        if on(Metric::NetworkIo) {
            metrics.insert(
                "Network_IO",
                value_or_na(p.network_totals(), |n| {
                    format!(
                        "Sent: {}, Received: {}",
                        format_data_size(n.bytes_sent),
                        format_data_size(n.bytes_received)
                    )
                    .into()
                }),
            );
        }
        if on(Metric::TopProcesses) {
            metrics.insert(
                "Top_Processes",
                value_or_na(p.processes(), |samples| {
                    MetricValue::Processes(select_top_processes(samples, TOP_PROCESS_LIMIT))
                }),
            );
        }

        Ok(Event::new(generate_event_id(sequence), metrics))
    }
}
