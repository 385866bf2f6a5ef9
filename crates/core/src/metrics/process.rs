use crate::{error::Result, provider::ProcessSample};
use sysinfo::System;

pub struct ProcessCollector {
    sys: System,
}

impl ProcessCollector {
    pub fn new() -> Result<Self> {
        let mut sys = System::new();
        sys.refresh_memory();
        sys.refresh_processes();

        Ok(Self { sys })
    }

    pub fn refresh(&mut self) {
        self.sys.refresh_memory();
        self.sys.refresh_processes();
    }

    pub fn count(&self) -> usize {
        self.sys.processes().len()
    }

    pub fn samples(&self) -> Vec<ProcessSample> {
        let total_memory = self.sys.total_memory();

        self.sys
            .processes()
            .values()
            .map(|process| {
                let memory_percent = if total_memory == 0 {
                    0.0
                } else {
                    super::round_to(process.memory() as f64 / total_memory as f64 * 100.0, 2)
                };
                ProcessSample::new(
                    process.name(),
                    super::round_to(process.cpu_usage() as f64, 1),
                    memory_percent,
                )
            })
            .collect()
    }
}
