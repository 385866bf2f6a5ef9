//! Newest-first JSON event log with an optional entry cap.
//!
//! The whole log is one pretty-printed JSON array that is read, prepended to
//! and rewritten on every merge. Reads are forgiving: a missing, unreadable
//! or malformed file counts as an empty log. Writes are not: any failure to
//! persist is returned to the caller.

use crate::{
    error::{CoreError, Result},
    model::Event,
};
use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Serializer, Value};
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

const INDENT: &[u8] = b"    ";

#[derive(Debug, Clone)]
pub struct EventLog {
    path: Option<PathBuf>,
    max_entries: usize,
}

impl EventLog {
    /// `path = None` disables persistence; `max_entries = 0` means unbounded.
    pub fn new(path: Option<PathBuf>, max_entries: usize) -> Self {
        Self { path, max_entries }
    }

    pub fn disabled() -> Self {
        Self::new(None, 0)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_enabled(&self) -> bool {
        self.path.is_some()
    }

    /// Prepend `event`, apply the cap and rewrite the file.
    ///
    /// Returns the number of entries now stored, or 0 when disabled.
    pub fn merge(&self, event: &Event) -> Result<usize> {
        let Some(path) = self.path.as_deref() else {
            return Ok(0);
        };

        let mut entries = read_entries(path);
        entries.insert(0, serde_json::to_value(event)?);
        if self.max_entries > 0 {
            entries.truncate(self.max_entries);
        }

        write_entries(path, &entries)?;
        debug!(path = %path.display(), entries = entries.len(), "event log updated");
        Ok(entries.len())
    }

    /// Stored events, newest first. Entries that are not events are skipped.
    #[cfg(test)]
    pub fn load(&self) -> Vec<Event> {
        let Some(path) = self.path.as_deref() else {
            return Vec::new();
        };

        read_entries(path)
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect()
    }
}

/// Existing log contents as raw JSON, so foreign entries survive a rewrite
fn read_entries(path: &Path) -> Vec<Value> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "event log unreadable, starting a new one");
            return Vec::new();
        }
    };

    match serde_json::from_slice::<Vec<Value>>(&bytes) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "event log is not a JSON array, discarding it");
            Vec::new()
        }
    }
}

/// Write through a temporary file in the same directory and rename it over
/// the log, so readers never observe a partial array.
fn write_entries(path: &Path, entries: &[Value]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let write = || -> io::Result<()> {
        let mut tmp = NamedTempFile::new_in(dir)?;
        {
            let mut ser = Serializer::with_formatter(&mut tmp, PrettyFormatter::with_indent(INDENT));
            entries.serialize(&mut ser).map_err(io::Error::from)?;
        }
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    };

    write().map_err(|e| CoreError::log_write(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Metrics;
    use tempfile::tempdir;

    fn event(n: u64) -> Event {
        let metrics: Metrics = [("Total_Processes", n)].into_iter().collect();
        Event::new(format!("{:08}abcdefghi", n), metrics)
    }

    fn ids(events: &[Event]) -> Vec<String> {
        events.iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_disabled_log_is_noop() {
        let log = EventLog::disabled();
        assert_eq!(log.merge(&event(1)).unwrap(), 0);
        assert!(log.load().is_empty());
    }

    #[test]
    fn test_merge_prepends_newest_first() {
        let dir = tempdir().unwrap();
        let log = EventLog::new(Some(dir.path().join("log.json")), 0);

        for n in 1..=4 {
            assert_eq!(log.merge(&event(n)).unwrap(), n as usize);
        }

        let stored = log.load();
        assert_eq!(ids(&stored), ids(&[event(4), event(3), event(2), event(1)]));
    }

    #[test]
    fn test_merge_respects_cap() {
        let dir = tempdir().unwrap();
        let log = EventLog::new(Some(dir.path().join("log.json")), 3);

        for n in 1..=7 {
            let count = log.merge(&event(n)).unwrap();
            assert!(count <= 3);
        }

        let stored = log.load();
        assert_eq!(stored.len(), 3);
        assert_eq!(ids(&stored), ids(&[event(7), event(6), event(5)]));
    }

    #[test]
    fn test_merge_recovers_from_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.json");
        fs::write(&path, b"\x00\xffnot json at all {[").unwrap();

        let log = EventLog::new(Some(path), 0);
        assert_eq!(log.merge(&event(9)).unwrap(), 1);
        assert_eq!(ids(&log.load()), ids(&[event(9)]));
    }

    #[test]
    fn test_merge_replaces_non_array_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.json");
        fs::write(&path, r#"{"eventID": "x"}"#).unwrap();

        let log = EventLog::new(Some(path), 0);
        assert_eq!(log.merge(&event(1)).unwrap(), 1);
    }

    #[test]
    fn test_merge_keeps_foreign_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.json");
        fs::write(&path, r#"[{"note": "kept"}]"#).unwrap();

        let log = EventLog::new(Some(path.clone()), 0);
        assert_eq!(log.merge(&event(2)).unwrap(), 2);

        let raw: Vec<Value> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw[1], serde_json::json!({"note": "kept"}));
    }

    #[test]
    fn test_file_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("log.json");
        let log = EventLog::new(Some(path.clone()), 0);
        log.merge(&event(1)).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let expected = "[\n    {\n        \"eventID\": \"00000001abcdefghi\",\n        \"sysMonLog\": {\n            \"Total_Processes\": 1\n        }\n    }\n]\n";
        assert_eq!(text, expected);

        // no temporary files left behind
        let leftovers = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_write_failure_is_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing-dir").join("log.json");
        let log = EventLog::new(Some(path), 0);

        let result = log.merge(&event(1));
        assert!(matches!(result, Err(CoreError::LogWrite { .. })));
    }
}
