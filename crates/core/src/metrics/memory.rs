use crate::{error::Result, provider::SwapUsage};
use sysinfo::System;

pub struct MemoryCollector {
    sys: System,
}

impl MemoryCollector {
    pub fn new() -> Result<Self> {
        let sys = System::new();

        Ok(Self { sys })
    }

    pub fn refresh(&mut self) {
        self.sys.refresh_memory();
    }

    pub fn ram_percent(&self) -> Option<f64> {
        let total = self.sys.total_memory();
        if total == 0 {
            return None;
        }
        Some(super::percent(self.sys.used_memory(), total))
    }

    /// Swap usage; a machine without swap reports zero rather than nothing
    pub fn swap(&self) -> SwapUsage {
        let total = self.sys.total_swap();
        let used = self.sys.used_swap();
        let percent = if total == 0 { 0.0 } else { super::percent(used, total) };

        SwapUsage {
            percent,
            used,
            total,
        }
    }
}
