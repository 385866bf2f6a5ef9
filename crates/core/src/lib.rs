pub mod config;
pub mod error;
pub mod event_log;
pub mod format;
pub mod metrics;
pub mod model;
pub mod platform;
pub mod provider;
pub mod scheduler;
pub mod selector;
pub mod snapshot;

pub use config::{CliConfig, Config};
pub use error::{CoreError, Result};
pub use event_log::EventLog;
pub use metrics::MetricsCollector;
pub use model::*;
pub use platform::PlatformProvider;
pub use provider::{MetricsProvider, Reading};
pub use scheduler::{CancellationToken, Presenter, Scheduler, SchedulerState};
pub use selector::{Metric, MetricSelector};
pub use snapshot::{generate_event_id, Snapshotter};
