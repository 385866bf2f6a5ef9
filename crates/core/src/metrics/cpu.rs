use crate::error::{CoreError, Result};
use sysinfo::System;

pub struct CpuCollector {
    sys: System,
}

impl CpuCollector {
    pub fn new() -> Result<Self> {
        let mut sys = System::new();
        sys.refresh_cpu();

        Ok(Self { sys })
    }

    /// Take a second measurement so the first usage reading covers a real
    /// interval instead of reporting zero.
    pub fn init(&mut self) -> Result<()> {
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        self.refresh()
    }

    pub fn refresh(&mut self) -> Result<()> {
        self.sys.refresh_cpu();

        if self.sys.cpus().is_empty() {
            return Err(CoreError::system_info("no CPUs visible to the metrics provider"));
        }
        Ok(())
    }

    /// Overall CPU usage across all cores
    pub fn usage_percent(&self) -> Option<f64> {
        if self.sys.cpus().is_empty() {
            return None;
        }
        Some(super::round_to(self.sys.global_cpu_info().cpu_usage() as f64, 1))
    }

    /// Current clock of the first core in MHz
    pub fn frequency_mhz(&self) -> Option<f64> {
        self.sys
            .cpus()
            .first()
            .map(|cpu| cpu.frequency())
            .filter(|mhz| *mhz > 0)
            .map(|mhz| mhz as f64)
    }

    pub fn physical_cores(&self) -> Option<usize> {
        self.sys.physical_core_count()
    }

    pub fn logical_cores(&self) -> Option<usize> {
        Some(self.sys.cpus().len()).filter(|n| *n > 0)
    }

    pub fn brand(&self) -> Option<String> {
        self.sys
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .filter(|brand| !brand.is_empty())
    }

    pub fn architecture(&self) -> Option<String> {
        System::cpu_arch().filter(|arch| !arch.is_empty())
    }
}
