use super::PlatformProvider;
use crate::provider::{BatteryStatus, DiskIoTotals};
use std::fs;
use std::path::Path;

const POWER_SUPPLY_ROOT: &str = "/sys/class/power_supply";
const CPUFREQ_ROOT: &str = "/sys/devices/system/cpu/cpu0/cpufreq";

pub struct LinuxProvider;

impl LinuxProvider {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformProvider for LinuxProvider {
    fn active_connections(&self) -> Option<usize> {
        #[cfg(feature = "linux_procfs")]
        {
            self.active_connections_procfs()
        }

        #[cfg(not(feature = "linux_procfs"))]
        {
            None
        }
    }

    fn disk_io(&self) -> Option<DiskIoTotals> {
        #[cfg(feature = "linux_procfs")]
        {
            self.disk_io_procfs()
        }

        #[cfg(not(feature = "linux_procfs"))]
        {
            None
        }
    }

    fn battery(&self) -> Option<BatteryStatus> {
        battery_from_sysfs(Path::new(POWER_SUPPLY_ROOT))
    }

    fn cpu_frequency_bounds(&self) -> (Option<f64>, Option<f64>) {
        let root = Path::new(CPUFREQ_ROOT);
        (
            read_khz_as_mhz(&root.join("cpuinfo_min_freq")),
            read_khz_as_mhz(&root.join("cpuinfo_max_freq")),
        )
    }

    fn platform_name(&self) -> &'static str {
        "linux"
    }
}

#[cfg(feature = "linux_procfs")]
impl LinuxProvider {
    fn active_connections_procfs(&self) -> Option<usize> {
        let tables = [
            procfs::net::tcp().map(|t| t.len()),
            procfs::net::tcp6().map(|t| t.len()),
            procfs::net::udp().map(|t| t.len()),
            procfs::net::udp6().map(|t| t.len()),
        ];

        // IPv6 tables are missing when the stack is disabled; only give up
        // if nothing at all could be read.
        let counts: Vec<usize> = tables.into_iter().filter_map(|t| t.ok()).collect();
        if counts.is_empty() {
            None
        } else {
            Some(counts.into_iter().sum())
        }
    }

    fn disk_io_procfs(&self) -> Option<DiskIoTotals> {
        let stats = match procfs::diskstats() {
            Ok(stats) => stats,
            Err(e) => {
                tracing::debug!(error = %e, "failed to read /proc/diskstats");
                return None;
            }
        };

        // Only whole devices listed under /sys/block, so partitions are not
        // counted twice.
        let mut totals = DiskIoTotals::default();
        for stat in stats {
            if !Path::new("/sys/block").join(&stat.name).exists() {
                continue;
            }
            totals.read_bytes += stat.sectors_read as u64 * 512;
            totals.write_bytes += stat.sectors_written as u64 * 512;
        }
        Some(totals)
    }
}

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn read_khz_as_mhz(path: &Path) -> Option<f64> {
    read_trimmed(path)?
        .parse::<f64>()
        .ok()
        .map(|khz| khz / 1000.0)
}

/// First supply of type `Battery` under `root`
fn battery_from_sysfs(root: &Path) -> Option<BatteryStatus> {
    let entries = fs::read_dir(root).ok()?;

    for entry in entries.flatten() {
        let dir = entry.path();
        if read_trimmed(&dir.join("type")).as_deref() != Some("Battery") {
            continue;
        }
        let Some(percent) = read_trimmed(&dir.join("capacity")).and_then(|c| c.parse::<f64>().ok())
        else {
            continue;
        };
        let status = read_trimmed(&dir.join("status"))
            .unwrap_or_default()
            .to_ascii_lowercase();

        return Some(BatteryStatus {
            percent,
            charging: status != "discharging",
        });
    }

    None
}
