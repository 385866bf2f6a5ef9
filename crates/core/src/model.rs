use crate::format::format_float;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Placeholder stored for a metric the provider cannot currently supply
pub const NOT_AVAILABLE: &str = "N/A";

/// One process row in the `Top_Processes` metric
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProcess {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "CPU%")]
    pub cpu_percent: f64,
    #[serde(rename = "Memory%")]
    pub memory_percent: f64,
}

/// A single metric value as stored in the event log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(u64),
    Float(f64),
    Text(String),
    Processes(Vec<TopProcess>),
}

impl MetricValue {
    pub fn not_available() -> Self {
        Self::Text(NOT_AVAILABLE.to_string())
    }

    pub fn is_not_available(&self) -> bool {
        matches!(self, Self::Text(text) if text == NOT_AVAILABLE)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{}", n),
            Self::Float(v) => f.write_str(&format_float(*v)),
            Self::Text(text) => f.write_str(text),
            Self::Processes(processes) => {
                let rows: Vec<String> = processes
                    .iter()
                    .map(|p| {
                        format!(
                            "{} (CPU: {}%, Memory: {}%)",
                            p.name,
                            format_float(p.cpu_percent),
                            format_float(p.memory_percent)
                        )
                    })
                    .collect();
                write!(f, "[{}]", rows.join(", "))
            }
        }
    }
}

impl From<u64> for MetricValue {
    fn from(value: u64) -> Self {
        Self::Count(value)
    }
}

impl From<usize> for MetricValue {
    fn from(value: usize) -> Self {
        Self::Count(value as u64)
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Insertion-ordered mapping from metric key to value.
///
/// Keys are unique; inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metrics {
    entries: Vec<(String, MetricValue)>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetricValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&MetricValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<MetricValue>> FromIterator<(K, V)> for Metrics {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metrics = Self::new();
        for (key, value) in iter {
            metrics.insert(key, value);
        }
        metrics
    }
}

impl Serialize for Metrics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Metrics {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MetricsVisitor;

        impl<'de> Visitor<'de> for MetricsVisitor {
            type Value = Metrics;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of metric names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Metrics, A::Error> {
                let mut metrics = Metrics::new();
                while let Some((key, value)) = access.next_entry::<String, MetricValue>()? {
                    metrics.insert(key, value);
                }
                Ok(metrics)
            }
        }

        deserializer.deserialize_map(MetricsVisitor)
    }
}

/// One snapshot of the selected metrics, immutable once built
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "eventID")]
    pub id: String,
    #[serde(rename = "sysMonLog")]
    pub metrics: Metrics,
}

impl Event {
    pub fn new(id: impl Into<String>, metrics: Metrics) -> Self {
        Self {
            id: id.into(),
            metrics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_format() {
        let metrics: Metrics = [
            ("System_Uptime", MetricValue::from("0 days, 1:00:00")),
            ("Total_Processes", MetricValue::from(212usize)),
            ("CPU_Usage%", MetricValue::from(42.0)),
        ]
        .into_iter()
        .collect();
        let event = Event::new("00000001abcdefghi", metrics);

        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"eventID":"00000001abcdefghi","sysMonLog":{"System_Uptime":"0 days, 1:00:00","Total_Processes":212,"CPU_Usage%":42.0}}"#
        );

        let parsed: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_metrics_keep_insertion_order() {
        let mut metrics = Metrics::new();
        metrics.insert("b", 1u64);
        metrics.insert("a", 2u64);
        metrics.insert("c", 3u64);
        metrics.insert("a", 4u64);
        let keys: Vec<&str> = metrics.keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
        assert_eq!(metrics.get("a"), Some(&MetricValue::Count(4)));
    }

    #[test]
    fn test_top_processes_value() {
        let value = MetricValue::Processes(vec![TopProcess {
            name: "init".to_string(),
            cpu_percent: 1.5,
            memory_percent: 0.25,
        }]);
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{"Name": "init", "CPU%": 1.5, "Memory%": 0.25}])
        );
        assert_eq!(value.to_string(), "[init (CPU: 1.5%, Memory: 0.25%)]");
    }

    #[test]
    fn test_not_available_sentinel() {
        let value = MetricValue::not_available();
        assert!(value.is_not_available());
        assert_eq!(value.to_string(), "N/A");
        assert_eq!(serde_json::to_value(&value).unwrap(), serde_json::json!("N/A"));
    }
}
