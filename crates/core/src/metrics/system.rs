use std::time::Duration;
use sysinfo::System;

pub struct SystemCollector;

impl SystemCollector {
    pub fn new() -> Self {
        Self
    }

    /// Time since boot; zero means the platform did not report it
    pub fn uptime(&self) -> Option<Duration> {
        match System::uptime() {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}
