use crate::error::Result;
use sysinfo::Components;

/// Sensor label fragments that identify a CPU package reading, most specific first
const CPU_SENSOR_LABELS: [&str; 5] = ["coretemp", "package id", "k10temp", "tctl", "cpu"];

pub struct TemperatureCollector {
    components: Components,
}

impl TemperatureCollector {
    pub fn new() -> Result<Self> {
        let components = Components::new_with_refreshed_list();

        Ok(Self { components })
    }

    pub fn refresh(&mut self) {
        self.components.refresh();
    }

    /// First valid CPU sensor reading in degrees Celsius
    pub fn cpu_temperature(&self) -> Option<f64> {
        let readings: Vec<(String, f32)> = self
            .components
            .list()
            .iter()
            .map(|c| (c.label().to_lowercase(), c.temperature()))
            .filter(|(_, temp)| temp.is_finite() && *temp > 0.0)
            .collect();

        CPU_SENSOR_LABELS.iter().find_map(|needle| {
            readings
                .iter()
                .find(|(label, _)| label.contains(needle))
                .map(|(_, temp)| super::round_to(*temp as f64, 1))
        })
    }
}
