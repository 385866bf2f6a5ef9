use crate::error::Result;
use std::path::Path;
use sysinfo::Disks;

pub struct DiskCollector {
    disks: Disks,
}

impl DiskCollector {
    pub fn new() -> Result<Self> {
        let disks = Disks::new_with_refreshed_list();

        Ok(Self { disks })
    }

    pub fn refresh(&mut self) {
        self.disks.refresh_list();
        self.disks.refresh();
    }

    /// Usage of the filesystem mounted at `/`
    pub fn root_usage_percent(&self) -> Option<f64> {
        self.usage_percent(Path::new("/"))
    }

    pub fn usage_percent(&self, mount_point: &Path) -> Option<f64> {
        let disk = self
            .disks
            .list()
            .iter()
            .find(|disk| disk.mount_point() == mount_point)?;

        let total = disk.total_space();
        if total == 0 {
            return None;
        }
        let used = total.saturating_sub(disk.available_space());
        Some(super::percent(used, total))
    }
}
