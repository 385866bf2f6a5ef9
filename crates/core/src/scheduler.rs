//! The sample → persist → display → sleep loop.
//!
//! The loop is strictly sequential. The sleep is the only suspension point
//! and it returns as soon as the [`CancellationToken`] fires, so a stop never
//! interrupts a log rewrite.

use crate::{
    config::Config,
    error::Result,
    event_log::EventLog,
    model::Event,
    provider::MetricsProvider,
    snapshot::Snapshotter,
};
use std::{
    sync::{Arc, Condvar, Mutex, PoisonError},
    time::{Duration, Instant},
};
use tracing::{debug, info};

/// Cloneable stop flag with an interruptible wait
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        let (lock, cvar) = &*self.inner;
        *lock.lock().unwrap_or_else(PoisonError::into_inner) = true;
        cvar.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *self.inner.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sleep for `timeout` or until cancelled. Returns `true` if cancelled.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let mut cancelled = lock.lock().unwrap_or_else(PoisonError::into_inner);

        // Past the clock's range: wait for cancellation only
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            while !*cancelled {
                cancelled = cvar.wait(cancelled).unwrap_or_else(PoisonError::into_inner);
            }
            return true;
        };

        while !*cancelled {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            cancelled = cvar
                .wait_timeout(cancelled, deadline - now)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
        *cancelled
    }
}

/// Renders events for the operator
pub trait Presenter {
    fn display(&mut self, event: &Event) -> Result<()>;

    fn started(&mut self) -> Result<()> {
        Ok(())
    }

    fn stopped(&mut self) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
    Stopped,
}

pub struct Scheduler<P, D> {
    config: Config,
    snapshotter: Snapshotter<P>,
    event_log: EventLog,
    presenter: D,
    state: SchedulerState,
    sequence: u64,
}

impl<P: MetricsProvider, D: Presenter> Scheduler<P, D> {
    pub fn new(config: Config, provider: P, presenter: D) -> Self {
        let event_log = EventLog::new(config.output_path.clone(), config.max_log_entries);

        Self {
            config,
            snapshotter: Snapshotter::new(provider),
            event_log,
            presenter,
            state: SchedulerState::Idle,
            sequence: 0,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Number of events captured so far
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn presenter(&self) -> &D {
        &self.presenter
    }

    /// Run one capture → persist → display cycle.
    pub fn tick(&mut self) -> Result<Event> {
        self.sequence += 1;
        let event = self.snapshotter.capture(&self.config.metrics, self.sequence)?;
        let stored = self.event_log.merge(&event)?;
        debug!(sequence = self.sequence, id = %event.id, stored, "cycle complete");
        self.presenter.display(&event)?;
        Ok(event)
    }

    /// Loop until `token` is cancelled or a fatal error occurs.
    ///
    /// Returns the number of completed cycles on a clean stop.
    pub fn run(&mut self, token: &CancellationToken) -> Result<u64> {
        self.state = SchedulerState::Running;
        let interval = self.config.sleep_interval();
        info!(
            interval_ms = interval.as_millis() as u64,
            log = ?self.event_log.path(),
            "monitoring started"
        );

        let result = self.run_loop(token, interval);
        self.state = SchedulerState::Stopped;

        let completed = result?;
        info!(cycles = completed, "monitoring stopped");
        self.presenter.stopped()?;
        Ok(completed)
    }

    fn run_loop(&mut self, token: &CancellationToken, interval: Duration) -> Result<u64> {
        self.presenter.started()?;
        let mut completed = 0;

        while !token.is_cancelled() {
            self.tick()?;
            completed += 1;

            if token.wait_timeout(interval) {
                break;
            }
        }
        Ok(completed)
    }
}
