//! Dashboard state: panes, their pollers, and the poll schedule.

use std::time::Duration;

use tracing::{debug, info};

use super::widgets::{AppsPane, MetricsPane};
use crate::config::Config;
use crate::provider::{Endpoint, HttpEndpoint, PollOutcome, Poller};
use crate::scheduler::{Clock, MonotonicClock, Scheduler};
use crate::view::columns::TableSchema;

/// Delay before the first metrics poll.
pub const METRICS_INITIAL_DELAY: Duration = Duration::from_millis(600);
/// Delay before the first apps poll.
pub const APPS_INITIAL_DELAY: Duration = Duration::from_millis(1200);

/// Bounds for `+`/`-` adjustments; a configured interval is used as given.
pub const MIN_INTERVAL: Duration = Duration::from_millis(250);
pub const MAX_INTERVAL: Duration = Duration::from_secs(300);

/// Periodic jobs driven by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollTask {
    ClusterMetrics,
    Apps,
}

pub struct Dashboard {
    pub metrics: MetricsPane,
    pub apps: AppsPane,
    metrics_poller: Poller<MetricsPane>,
    apps_poller: Poller<AppsPane>,
    scheduler: Scheduler<PollTask>,
    interval: Duration,
    status_dirty: bool,
    should_quit: bool,
}

impl Dashboard {
    /// Builds the dashboard and arms the first poll of each pane.
    pub fn new(
        config: &Config,
        metrics_endpoint: Box<dyn Endpoint>,
        apps_endpoint: Box<dyn Endpoint>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let schema = TableSchema::resolve(&config.display_columns);
        let mut scheduler = Scheduler::new(clock);
        scheduler.schedule_after(METRICS_INITIAL_DELAY, PollTask::ClusterMetrics);
        scheduler.schedule_after(APPS_INITIAL_DELAY, PollTask::Apps);

        Self {
            metrics: MetricsPane::new(),
            apps: AppsPane::new(schema),
            metrics_poller: Poller::new(metrics_endpoint),
            apps_poller: Poller::new(apps_endpoint),
            scheduler,
            interval: config.interval(),
            status_dirty: false,
            should_quit: false,
        }
    }

    /// Dashboard polling the resource manager at `base_uri`.
    pub fn connect(config: &Config, base_uri: &str) -> Self {
        info!(base_uri, "polling resource manager");
        Self::new(
            config,
            Box::new(HttpEndpoint::cluster_metrics(base_uri)),
            Box::new(HttpEndpoint::cluster_apps(base_uri)),
            Box::new(MonotonicClock::new()),
        )
    }

    /// Runs every task that is due, one at a time, and re-arms each with the
    /// interval current at the moment it ran. A task re-armed here waits for
    /// the next call even if already due again. Returns how many ran.
    pub fn run_due(&mut self) -> usize {
        let due: Vec<PollTask> = std::iter::from_fn(|| self.scheduler.pop_due()).collect();
        for &task in &due {
            self.fire(task);
        }
        due.len()
    }

    fn fire(&mut self, task: PollTask) -> PollOutcome {
        let was_failing = self.is_failing();
        let outcome = match task {
            PollTask::ClusterMetrics => self.metrics_poller.poll(&mut self.metrics),
            PollTask::Apps => self.apps_poller.poll(&mut self.apps),
        };
        if outcome != PollOutcome::NoUpdate {
            debug!(?task, ?outcome, "poll finished");
        }
        if self.is_failing() != was_failing {
            self.status_dirty = true;
        }
        self.scheduler.schedule_after(self.interval, task);
        outcome
    }

    /// How long the event loop may wait for input before a poll is due.
    pub fn time_until_next(&self) -> Option<Duration> {
        self.scheduler.time_until_next()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Sets the live poll interval; pending timers keep their deadlines.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
        info!(interval = ?self.interval, "poll interval changed");
    }

    /// Doubles the interval, up to [`MAX_INTERVAL`]. Never shortens it.
    pub fn slower(&mut self) {
        let next = self.interval.saturating_mul(2).min(MAX_INTERVAL);
        self.set_interval(next.max(self.interval));
    }

    /// Halves the interval, down to [`MIN_INTERVAL`]. Never lengthens it.
    pub fn faster(&mut self) {
        let next = (self.interval / 2).max(MIN_INTERVAL);
        self.set_interval(next.min(self.interval));
    }

    /// Drops all pending polls and flags the loop to exit.
    pub fn shutdown(&mut self) {
        self.scheduler.shutdown();
        self.should_quit = true;
    }

    /// True while the last fetch of either pane failed.
    pub fn is_failing(&self) -> bool {
        self.metrics_poller.consecutive_failures() > 0
            || self.apps_poller.consecutive_failures() > 0
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns whether any pane or the fetch status changed since the last call.
    pub fn take_dirty(&mut self) -> bool {
        let metrics = self.metrics.take_dirty();
        let apps = self.apps.take_dirty();
        let status = std::mem::take(&mut self.status_dirty);
        metrics || apps || status
    }

    pub fn pending(&self) -> Vec<PollTask> {
        self.scheduler.pending().copied().collect()
    }

    pub fn poll_attempts(&self, task: PollTask) -> u64 {
        match task {
            PollTask::ClusterMetrics => self.metrics_poller.attempts(),
            PollTask::Apps => self.apps_poller.attempts(),
        }
    }
}
