pub mod cpu;
pub mod disk;
pub mod memory;
pub mod network;
pub mod process;
pub mod system;
pub mod temperature;

pub use cpu::CpuCollector;
pub use disk::DiskCollector;
pub use memory::MemoryCollector;
pub use network::NetworkCollector;
pub use process::ProcessCollector;
pub use system::SystemCollector;
pub use temperature::TemperatureCollector;

use crate::{
    error::Result,
    platform::{get_platform_provider, PlatformProvider},
    provider::{
        BatteryStatus, CpuFrequency, DiskIoTotals, MetricsProvider, NetworkTotals, ProcessSample,
        Reading, SwapUsage,
    },
};
use std::time::Duration;

/// CPU and per-process usage are averaged over this window before each snapshot
pub const CPU_SAMPLE_WINDOW: Duration = sysinfo::MINIMUM_CPU_UPDATE_INTERVAL;

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// `part / total` in percent, one decimal
pub(crate) fn percent(part: u64, total: u64) -> f64 {
    round_to(part as f64 / total as f64 * 100.0, 1)
}

/// sysinfo-backed metrics provider that coordinates all sub-collectors
pub struct MetricsCollector {
    system: SystemCollector,
    cpu: CpuCollector,
    memory: MemoryCollector,
    disk: DiskCollector,
    network: NetworkCollector,
    temperature: TemperatureCollector,
    process: ProcessCollector,
    platform: Box<dyn PlatformProvider>,
}

impl MetricsCollector {
    pub fn new() -> Result<Self> {
        Ok(Self {
            system: SystemCollector::new(),
            cpu: CpuCollector::new()?,
            memory: MemoryCollector::new()?,
            disk: DiskCollector::new()?,
            network: NetworkCollector::new()?,
            temperature: TemperatureCollector::new()?,
            process: ProcessCollector::new()?,
            platform: get_platform_provider(),
        })
    }

    /// Take baseline measurements so the first snapshot has real CPU figures
    pub fn init(&mut self) -> Result<()> {
        self.cpu.init()?;
        self.process.refresh();
        tracing::debug!(platform = self.platform.platform_name(), "metrics collector initialised");
        Ok(())
    }

    pub fn platform_name(&self) -> &'static str {
        self.platform.platform_name()
    }
}

impl MetricsProvider for MetricsCollector {
    fn refresh(&mut self) -> Result<()> {
        // Usage is a delta between two refreshes; start the window here so a
        // long sleep between snapshots is not averaged in.
        self.cpu.refresh()?;
        self.process.refresh();
        std::thread::sleep(CPU_SAMPLE_WINDOW);

        self.cpu.refresh()?;
        self.memory.refresh();
        self.disk.refresh();
        self.network.refresh();
        self.temperature.refresh();
        self.process.refresh();
        Ok(())
    }

    fn uptime(&mut self) -> Reading<Duration> {
        self.system.uptime().into()
    }

    fn active_connections(&mut self) -> Reading<usize> {
        self.platform.active_connections().into()
    }

    fn disk_usage_percent(&mut self) -> Reading<f64> {
        self.disk.root_usage_percent().into()
    }

    fn process_count(&mut self) -> Reading<usize> {
        Reading::Available(self.process.count())
    }

    fn cpu_usage_percent(&mut self) -> Reading<f64> {
        self.cpu.usage_percent().into()
    }

    fn ram_usage_percent(&mut self) -> Reading<f64> {
        self.memory.ram_percent().into()
    }

    fn network_totals(&mut self) -> Reading<NetworkTotals> {
        self.network.totals().into()
    }

    fn cpu_temperature(&mut self) -> Reading<f64> {
        self.temperature.cpu_temperature().into()
    }

    fn battery(&mut self) -> Reading<BatteryStatus> {
        self.platform.battery().into()
    }

    fn cpu_frequency(&mut self) -> Reading<CpuFrequency> {
        let (min, max) = self.platform.cpu_frequency_bounds();
        self.cpu
            .frequency_mhz()
            .map(|current| CpuFrequency { current, min, max })
            .into()
    }

    fn physical_cores(&mut self) -> Reading<usize> {
        self.cpu.physical_cores().into()
    }

    fn logical_cores(&mut self) -> Reading<usize> {
        self.cpu.logical_cores().into()
    }

    fn cpu_model(&mut self) -> Reading<String> {
        self.cpu.brand().into()
    }

    fn cpu_architecture(&mut self) -> Reading<String> {
        self.cpu.architecture().into()
    }

    fn swap(&mut self) -> Reading<SwapUsage> {
        Reading::Available(self.memory.swap())
    }

    fn disk_io(&mut self) -> Reading<DiskIoTotals> {
        self.platform.disk_io().into()
    }

    fn processes(&mut self) -> Reading<Vec<ProcessSample>> {
        Reading::Available(self.process.samples())
    }
}
