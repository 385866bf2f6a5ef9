use crate::{error::Result, provider::NetworkTotals};
use sysinfo::Networks;

pub struct NetworkCollector {
    networks: Networks,
}

impl NetworkCollector {
    pub fn new() -> Result<Self> {
        let networks = Networks::new_with_refreshed_list();

        Ok(Self { networks })
    }

    pub fn refresh(&mut self) {
        self.networks.refresh_list();
        self.networks.refresh();
    }

    /// Totals since boot over every interface, loopback included
    pub fn totals(&self) -> Option<NetworkTotals> {
        let mut totals = NetworkTotals::default();
        let mut seen = false;

        for (_interface_name, data) in &self.networks {
            totals.bytes_received += data.total_received();
            totals.bytes_sent += data.total_transmitted();
            seen = true;
        }

        seen.then_some(totals)
    }
}
